/*!
`cluster.rs`

Argument builders for the cluster-scoped operations: namespace lifecycle,
events, nodes and node administration, metrics (`top`), kubeconfig contexts,
and the generic apply/get/delete escape hatches.

Manifest validation for `apply` happens locally (YAML parse) before any
process is spawned, so a malformed manifest fails fast with a parse error
instead of a kubectl stderr dump.
*/

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::{base, scope};

/* ---- Namespaces & events ---- */

pub fn list_namespaces_args() -> Vec<String> {
    base(&["get", "namespaces"])
}

pub fn create_namespace_args(name: &str) -> Vec<String> {
    base(&["create", "namespace", name])
}

pub fn delete_namespace_args(name: &str) -> Vec<String> {
    base(&["delete", "namespace", name])
}

pub fn get_events_args(namespace: &str, all_namespaces: bool) -> Vec<String> {
    let mut args = base(&["get", "events", "--sort-by=.lastTimestamp"]);
    args.extend(scope(namespace, all_namespaces));
    args
}

/* ---- Nodes & metrics ---- */

pub fn list_nodes_args(label_selector: Option<&str>) -> Vec<String> {
    let mut args = base(&["get", "nodes", "-o", "wide"]);
    if let Some(sel) = label_selector {
        args.push("-l".to_string());
        args.push(sel.to_string());
    }
    args
}

pub fn describe_node_args(name: &str) -> Vec<String> {
    base(&["describe", "node", name])
}

pub fn cordon_node_args(name: &str) -> Vec<String> {
    base(&["cordon", name])
}

pub fn uncordon_node_args(name: &str) -> Vec<String> {
    base(&["uncordon", name])
}

pub fn drain_node_args(
    name: &str,
    force: bool,
    ignore_daemonsets: bool,
    delete_emptydir_data: bool,
) -> Vec<String> {
    let mut args = base(&["drain", name]);
    if force {
        args.push("--force".to_string());
    }
    if ignore_daemonsets {
        args.push("--ignore-daemonsets".to_string());
    }
    if delete_emptydir_data {
        args.push("--delete-emptydir-data".to_string());
    }
    args
}

pub fn top_nodes_args() -> Vec<String> {
    base(&["top", "nodes"])
}

/* ---- Contexts ---- */

pub fn list_contexts_args() -> Vec<String> {
    base(&["config", "get-contexts"])
}

pub fn current_context_args() -> Vec<String> {
    base(&["config", "current-context"])
}

pub fn use_context_args(name: &str) -> Vec<String> {
    base(&["config", "use-context", name])
}

/* ---- Generic resources ---- */

pub fn apply_manifest_args(namespace: &str) -> Vec<String> {
    base(&["apply", "-f", "-", "-n", namespace])
}

pub fn get_resource_args(kind: &str, name: &str, namespace: Option<&str>) -> Vec<String> {
    let mut args = base(&["get", kind, name]);
    if let Some(ns) = namespace {
        args.push("-n".to_string());
        args.push(ns.to_string());
    }
    args.push("-o".to_string());
    args.push("json".to_string());
    args
}

pub fn delete_resource_args(kind: &str, name: &str, namespace: Option<&str>) -> Vec<String> {
    let mut args = base(&["delete", kind, name]);
    if let Some(ns) = namespace {
        args.push("-n".to_string());
        args.push(ns.to_string());
    }
    args
}

pub fn cluster_info_args() -> Vec<String> {
    base(&["cluster-info"])
}

pub fn api_resources_args() -> Vec<String> {
    base(&["api-resources"])
}

/// Parse the manifest as (possibly multi-document) YAML and return the
/// number of non-empty documents. Fails on syntax errors or an empty file.
pub fn validate_manifest(manifest: &str) -> Result<usize> {
    let mut documents = 0;
    for doc in serde_yaml::Deserializer::from_str(manifest) {
        let value = serde_yaml::Value::deserialize(doc).context("manifest is not valid YAML")?;
        if !value.is_null() {
            documents += 1;
        }
    }
    if documents == 0 {
        bail!("manifest contains no YAML documents");
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_sorted_and_scoped() {
        assert_eq!(
            get_events_args("web", false),
            vec!["get", "events", "--sort-by=.lastTimestamp", "-n", "web"]
        );
        assert_eq!(
            get_events_args("web", true),
            vec!["get", "events", "--sort-by=.lastTimestamp", "--all-namespaces"]
        );
    }

    #[test]
    fn drain_flags_are_optional() {
        assert_eq!(drain_node_args("node1", false, false, false), vec!["drain", "node1"]);
        assert_eq!(
            drain_node_args("node1", true, true, true),
            vec!["drain", "node1", "--force", "--ignore-daemonsets", "--delete-emptydir-data"]
        );
    }

    #[test]
    fn generic_get_omits_namespace_for_cluster_scoped_kinds() {
        assert_eq!(
            get_resource_args("clusterrole", "admin", None),
            vec!["get", "clusterrole", "admin", "-o", "json"]
        );
        assert_eq!(
            get_resource_args("ingress", "web", Some("web")),
            vec!["get", "ingress", "web", "-n", "web", "-o", "json"]
        );
    }

    #[test]
    fn context_commands() {
        assert_eq!(list_contexts_args(), vec!["config", "get-contexts"]);
        assert_eq!(current_context_args(), vec!["config", "current-context"]);
        assert_eq!(use_context_args("prod"), vec!["config", "use-context", "prod"]);
    }

    #[test]
    fn valid_manifest_counts_documents() {
        let manifest = "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: web\n---\napiVersion: v1\nkind: Pod\nmetadata:\n  name: p\n";
        assert_eq!(validate_manifest(manifest).unwrap(), 2);
    }

    #[test]
    fn invalid_yaml_is_rejected_before_spawn() {
        let err = validate_manifest("kind: [unclosed").unwrap_err();
        assert!(err.to_string().contains("not valid YAML"));
    }

    #[test]
    fn empty_manifest_is_rejected() {
        assert!(validate_manifest("---\n").is_err());
    }
}
