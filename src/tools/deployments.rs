/*!
`deployments.rs`

Argument builders and result shaping for deployment operations.

Operations:
  list_deployments     - `get deployments` (tabular)
  get_deployment       - `get deployment NAME -o json`, shape_deployment
  describe_deployment  - verbatim describe text
  create_deployment    - `create deployment` with image/replicas/port
  scale_deployment     - `scale deployment NAME --replicas=N`
  autoscale_deployment - `autoscale deployment` with min/max/cpu-percent
  set_deployment_image - `set image deployment/NAME CONTAINER=IMAGE`
  delete_deployment    - `delete deployment NAME`
*/

use anyhow::Result;
use serde_json::{Value, json};

use super::{base, parse_json, pretty, scope};

pub fn list_deployments_args(
    namespace: &str,
    all_namespaces: bool,
    label_selector: Option<&str>,
) -> Vec<String> {
    let mut args = base(&["get", "deployments"]);
    args.extend(scope(namespace, all_namespaces));
    if let Some(sel) = label_selector {
        args.push("-l".to_string());
        args.push(sel.to_string());
    }
    args
}

pub fn get_deployment_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["get", "deployment", name, "-n", namespace, "-o", "json"])
}

pub fn describe_deployment_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["describe", "deployment", name, "-n", namespace])
}

pub fn create_deployment_args(
    name: &str,
    image: &str,
    namespace: &str,
    replicas: Option<u32>,
    port: Option<u16>,
) -> Vec<String> {
    let mut args = base(&["create", "deployment", name]);
    args.push(format!("--image={image}"));
    if let Some(n) = replicas {
        args.push(format!("--replicas={n}"));
    }
    if let Some(p) = port {
        args.push(format!("--port={p}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn scale_deployment_args(name: &str, namespace: &str, replicas: u32) -> Vec<String> {
    let mut args = base(&["scale", "deployment", name]);
    args.push(format!("--replicas={replicas}"));
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn autoscale_deployment_args(
    name: &str,
    namespace: &str,
    min_replicas: u32,
    max_replicas: u32,
    cpu_percent: Option<u32>,
) -> Vec<String> {
    let mut args = base(&["autoscale", "deployment", name]);
    args.push(format!("--min={min_replicas}"));
    args.push(format!("--max={max_replicas}"));
    if let Some(pct) = cpu_percent {
        args.push(format!("--cpu-percent={pct}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn set_deployment_image_args(
    name: &str,
    namespace: &str,
    container: &str,
    image: &str,
) -> Vec<String> {
    let mut args = base(&["set", "image"]);
    args.push(format!("deployment/{name}"));
    args.push(format!("{container}={image}"));
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn delete_deployment_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["delete", "deployment", name, "-n", namespace])
}

/// Project a deployment capture down to replica counts, strategy, images,
/// and condition summaries.
pub fn shape_deployment(raw: &str) -> Result<String> {
    let dep = parse_json(raw)?;

    let images: Vec<Value> = dep["spec"]["template"]["spec"]["containers"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|c| json!({ "name": c["name"], "image": c["image"] }))
        .collect();

    let conditions: Vec<Value> = dep["status"]["conditions"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|c| json!({ "type": c["type"], "status": c["status"], "reason": c["reason"] }))
        .collect();

    Ok(pretty(&json!({
        "name": dep["metadata"]["name"],
        "namespace": dep["metadata"]["namespace"],
        "replicas": {
            "desired": dep["spec"]["replicas"],
            "ready": dep["status"]["readyReplicas"],
            "updated": dep["status"]["updatedReplicas"],
            "available": dep["status"]["availableReplicas"],
        },
        "strategy": dep["spec"]["strategy"]["type"],
        "selector": dep["spec"]["selector"]["matchLabels"],
        "containers": images,
        "conditions": conditions,
        "created": dep["metadata"]["creationTimestamp"],
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_builds_replicas_flag() {
        assert_eq!(
            scale_deployment_args("web", "default", 3),
            vec!["scale", "deployment", "web", "--replicas=3", "-n", "default"]
        );
    }

    #[test]
    fn create_with_all_options() {
        assert_eq!(
            create_deployment_args("web", "nginx:1.27", "web", Some(2), Some(8080)),
            vec![
                "create", "deployment", "web",
                "--image=nginx:1.27", "--replicas=2", "--port=8080",
                "-n", "web"
            ]
        );
    }

    #[test]
    fn create_minimal() {
        assert_eq!(
            create_deployment_args("web", "nginx", "default", None, None),
            vec!["create", "deployment", "web", "--image=nginx", "-n", "default"]
        );
    }

    #[test]
    fn autoscale_bounds_and_target() {
        assert_eq!(
            autoscale_deployment_args("web", "web", 2, 10, Some(70)),
            vec!["autoscale", "deployment", "web", "--min=2", "--max=10", "--cpu-percent=70", "-n", "web"]
        );
    }

    #[test]
    fn set_image_uses_slash_form() {
        assert_eq!(
            set_deployment_image_args("web", "web", "app", "nginx:1.28"),
            vec!["set", "image", "deployment/web", "app=nginx:1.28", "-n", "web"]
        );
    }

    #[test]
    fn list_all_namespaces() {
        assert_eq!(
            list_deployments_args("x", true, None),
            vec!["get", "deployments", "--all-namespaces"]
        );
    }

    #[test]
    fn shape_deployment_projects_replica_counts() {
        let raw = r#"{
            "metadata": {"name": "web", "namespace": "web", "creationTimestamp": "2026-01-01T00:00:00Z"},
            "spec": {
                "replicas": 3,
                "strategy": {"type": "RollingUpdate"},
                "selector": {"matchLabels": {"app": "web"}},
                "template": {"spec": {"containers": [{"name": "app", "image": "nginx:1.27"}]}}
            },
            "status": {
                "readyReplicas": 2, "updatedReplicas": 3, "availableReplicas": 2,
                "conditions": [{"type": "Available", "status": "True", "reason": "MinimumReplicasAvailable"}]
            }
        }"#;
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_deployment(raw).unwrap()).unwrap();
        assert_eq!(shaped["replicas"]["desired"], 3);
        assert_eq!(shaped["replicas"]["ready"], 2);
        assert_eq!(shaped["strategy"], "RollingUpdate");
        assert_eq!(shaped["containers"][0]["image"], "nginx:1.27");
        assert_eq!(shaped["conditions"][0]["type"], "Available");
    }
}
