/*!
`pods.rs`

Argument builders and result shaping for pod operations.

Operations:
  list_pods     - `get pods` (tabular, namespace or all-namespaces scope)
  get_pod       - `get pod NAME -o json`, projected via shape_pod
  describe_pod  - `describe pod NAME` (verbatim text)
  delete_pod    - `delete pod NAME` (+ --force --grace-period=0)
  pod_logs      - `logs NAME` with container/tail/previous/since knobs
  exec_in_pod   - `exec NAME -- sh -c CMD`
  top_pods      - `top pods` (requires metrics-server on the cluster)
*/

use anyhow::Result;
use serde_json::{Value, json};

use super::{base, parse_json, pretty, scope};

pub fn list_pods_args(
    namespace: &str,
    all_namespaces: bool,
    label_selector: Option<&str>,
    field_selector: Option<&str>,
) -> Vec<String> {
    let mut args = base(&["get", "pods"]);
    args.extend(scope(namespace, all_namespaces));
    if let Some(sel) = label_selector {
        args.push("-l".to_string());
        args.push(sel.to_string());
    }
    if let Some(sel) = field_selector {
        args.push("--field-selector".to_string());
        args.push(sel.to_string());
    }
    args
}

pub fn get_pod_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["get", "pod", name, "-n", namespace, "-o", "json"])
}

pub fn describe_pod_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["describe", "pod", name, "-n", namespace])
}

pub fn delete_pod_args(name: &str, namespace: &str, force: bool) -> Vec<String> {
    let mut args = base(&["delete", "pod", name, "-n", namespace]);
    if force {
        args.push("--force".to_string());
        args.push("--grace-period=0".to_string());
    }
    args
}

pub fn pod_logs_args(
    name: &str,
    namespace: &str,
    container: Option<&str>,
    tail: Option<i64>,
    previous: bool,
    since: Option<&str>,
) -> Vec<String> {
    let mut args = base(&["logs", name, "-n", namespace]);
    if let Some(c) = container {
        args.push("-c".to_string());
        args.push(c.to_string());
    }
    if let Some(n) = tail {
        args.push(format!("--tail={n}"));
    }
    if previous {
        args.push("--previous".to_string());
    }
    if let Some(window) = since {
        args.push(format!("--since={window}"));
    }
    args
}

/// The command is handed to `sh -c` inside the container, so shell syntax
/// (pipes, redirects) works the same as in an interactive `kubectl exec`.
pub fn exec_in_pod_args(
    name: &str,
    namespace: &str,
    container: Option<&str>,
    command: &str,
) -> Vec<String> {
    let mut args = base(&["exec", name, "-n", namespace]);
    if let Some(c) = container {
        args.push("-c".to_string());
        args.push(c.to_string());
    }
    args.push("--".to_string());
    args.push("sh".to_string());
    args.push("-c".to_string());
    args.push(command.to_string());
    args
}

pub fn top_pods_args(namespace: &str, all_namespaces: bool) -> Vec<String> {
    let mut args = base(&["top", "pods"]);
    args.extend(scope(namespace, all_namespaces));
    args
}

/// Project a pod `get -o json` capture down to identity, phase, placement,
/// and per-container image/readiness/restart info.
pub fn shape_pod(raw: &str) -> Result<String> {
    let pod = parse_json(raw)?;

    let statuses = pod["status"]["containerStatuses"].as_array().cloned().unwrap_or_default();
    let containers: Vec<Value> = pod["spec"]["containers"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|c| {
            let name = c["name"].as_str().unwrap_or_default();
            let status = statuses.iter().find(|s| s["name"].as_str() == Some(name));
            json!({
                "name": name,
                "image": c["image"],
                "ready": status.map(|s| s["ready"].clone()).unwrap_or(Value::Null),
                "restarts": status.map(|s| s["restartCount"].clone()).unwrap_or(Value::Null),
            })
        })
        .collect();

    Ok(pretty(&json!({
        "name": pod["metadata"]["name"],
        "namespace": pod["metadata"]["namespace"],
        "phase": pod["status"]["phase"],
        "node": pod["spec"]["nodeName"],
        "pod_ip": pod["status"]["podIP"],
        "start_time": pod["status"]["startTime"],
        "labels": pod["metadata"]["labels"],
        "containers": containers,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_scopes_to_namespace() {
        let args = list_pods_args("web", false, None, None);
        assert_eq!(args, vec!["get", "pods", "-n", "web"]);
    }

    #[test]
    fn list_all_namespaces_replaces_namespace_flag() {
        let args = list_pods_args("web", true, None, None);
        assert_eq!(args, vec!["get", "pods", "--all-namespaces"]);
        assert!(!args.contains(&"-n".to_string()));
    }

    #[test]
    fn list_selectors_are_appended() {
        let args = list_pods_args("web", false, Some("app=api"), Some("status.phase=Running"));
        assert_eq!(
            args,
            vec!["get", "pods", "-n", "web", "-l", "app=api", "--field-selector", "status.phase=Running"]
        );
    }

    #[test]
    fn delete_force_adds_grace_period_zero() {
        assert_eq!(
            delete_pod_args("web-0", "web", true),
            vec!["delete", "pod", "web-0", "-n", "web", "--force", "--grace-period=0"]
        );
        assert_eq!(
            delete_pod_args("web-0", "web", false),
            vec!["delete", "pod", "web-0", "-n", "web"]
        );
    }

    #[test]
    fn logs_flags() {
        let args = pod_logs_args("web-0", "web", Some("app"), Some(100), true, Some("5m"));
        assert_eq!(
            args,
            vec!["logs", "web-0", "-n", "web", "-c", "app", "--tail=100", "--previous", "--since=5m"]
        );
    }

    #[test]
    fn exec_wraps_command_in_sh() {
        let args = exec_in_pod_args("web-0", "web", None, "ls -la /tmp");
        assert_eq!(args, vec!["exec", "web-0", "-n", "web", "--", "sh", "-c", "ls -la /tmp"]);
    }

    #[test]
    fn exec_command_is_a_single_token() {
        // Quoting for remote mode happens in the executor; the builder must
        // not split the command.
        let args = exec_in_pod_args("web-0", "web", Some("app"), "echo \"a b\"");
        assert_eq!(args.last().unwrap(), "echo \"a b\"");
        assert_eq!(&args[4..6], ["-c", "app"]);
    }

    #[test]
    fn shape_pod_projects_subset() {
        let raw = r#"{
            "metadata": {"name": "web-0", "namespace": "web", "labels": {"app": "web"}},
            "spec": {"nodeName": "node1", "containers": [{"name": "app", "image": "nginx:1.27"}]},
            "status": {
                "phase": "Running",
                "podIP": "10.1.2.3",
                "startTime": "2026-01-01T00:00:00Z",
                "containerStatuses": [{"name": "app", "ready": true, "restartCount": 2}]
            }
        }"#;
        let shaped: serde_json::Value = serde_json::from_str(&shape_pod(raw).unwrap()).unwrap();
        assert_eq!(shaped["name"], "web-0");
        assert_eq!(shaped["phase"], "Running");
        assert_eq!(shaped["containers"][0]["image"], "nginx:1.27");
        assert_eq!(shaped["containers"][0]["restarts"], 2);
        assert!(shaped.get("spec").is_none(), "full spec must not leak through");
    }

    #[test]
    fn shape_pod_rejects_non_json() {
        assert!(shape_pod("No resources found").is_err());
    }
}
