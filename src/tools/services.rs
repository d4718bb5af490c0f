/*!
`services.rs`

Argument builders and result shaping for service operations.

Operations:
  list_services     - `get services` (tabular)
  get_service       - `get service NAME -o json`, shape_service
  describe_service  - verbatim describe text
  expose_deployment - `expose deployment NAME --port=... [--target-port] [--type] [--name]`
  delete_service    - `delete service NAME`
*/

use anyhow::Result;
use serde_json::{Value, json};

use super::{base, parse_json, pretty, scope};

pub fn list_services_args(namespace: &str, all_namespaces: bool) -> Vec<String> {
    let mut args = base(&["get", "services"]);
    args.extend(scope(namespace, all_namespaces));
    args
}

pub fn get_service_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["get", "service", name, "-n", namespace, "-o", "json"])
}

pub fn describe_service_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["describe", "service", name, "-n", namespace])
}

pub fn expose_deployment_args(
    deployment: &str,
    namespace: &str,
    port: u16,
    target_port: Option<u16>,
    service_type: Option<&str>,
    service_name: Option<&str>,
) -> Vec<String> {
    let mut args = base(&["expose", "deployment", deployment]);
    args.push(format!("--port={port}"));
    if let Some(tp) = target_port {
        args.push(format!("--target-port={tp}"));
    }
    if let Some(ty) = service_type {
        args.push(format!("--type={ty}"));
    }
    if let Some(name) = service_name {
        args.push(format!("--name={name}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn delete_service_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["delete", "service", name, "-n", namespace])
}

/// Project a service capture down to type, addressing, and port mappings.
pub fn shape_service(raw: &str) -> Result<String> {
    let svc = parse_json(raw)?;

    let ports: Vec<Value> = svc["spec"]["ports"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|p| {
            json!({
                "name": p["name"],
                "port": p["port"],
                "target_port": p["targetPort"],
                "node_port": p["nodePort"],
                "protocol": p["protocol"],
            })
        })
        .collect();

    Ok(pretty(&json!({
        "name": svc["metadata"]["name"],
        "namespace": svc["metadata"]["namespace"],
        "type": svc["spec"]["type"],
        "cluster_ip": svc["spec"]["clusterIP"],
        "external_ips": svc["spec"]["externalIPs"],
        "selector": svc["spec"]["selector"],
        "ports": ports,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expose_full_flags() {
        assert_eq!(
            expose_deployment_args("web", "web", 80, Some(8080), Some("NodePort"), Some("web-svc")),
            vec![
                "expose", "deployment", "web",
                "--port=80", "--target-port=8080", "--type=NodePort", "--name=web-svc",
                "-n", "web"
            ]
        );
    }

    #[test]
    fn expose_minimal() {
        assert_eq!(
            expose_deployment_args("web", "default", 80, None, None, None),
            vec!["expose", "deployment", "web", "--port=80", "-n", "default"]
        );
    }

    #[test]
    fn get_requests_json() {
        assert_eq!(
            get_service_args("web", "web"),
            vec!["get", "service", "web", "-n", "web", "-o", "json"]
        );
    }

    #[test]
    fn shape_service_projects_ports() {
        let raw = r#"{
            "metadata": {"name": "web", "namespace": "web"},
            "spec": {
                "type": "NodePort",
                "clusterIP": "10.96.0.10",
                "selector": {"app": "web"},
                "ports": [{"name": "http", "port": 80, "targetPort": 8080, "nodePort": 30080, "protocol": "TCP"}]
            }
        }"#;
        let shaped: serde_json::Value = serde_json::from_str(&shape_service(raw).unwrap()).unwrap();
        assert_eq!(shaped["type"], "NodePort");
        assert_eq!(shaped["cluster_ip"], "10.96.0.10");
        assert_eq!(shaped["ports"][0]["node_port"], 30080);
    }
}
