/*!
`configmaps.rs`

Argument builders and result shaping for configmap operations.

`update_configmap` is the one multi-step operation in the catalog: kubectl
has no idempotent "create or replace from literals", so the update renders
the desired object with `--dry-run=client -o yaml` and pipes it into
`apply -f -`. Data is carried in a BTreeMap so the rendered argument order
is deterministic.
*/

use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::json;

use super::{base, parse_json, pretty, scope};

pub fn list_configmaps_args(namespace: &str, all_namespaces: bool) -> Vec<String> {
    let mut args = base(&["get", "configmaps"]);
    args.extend(scope(namespace, all_namespaces));
    args
}

pub fn get_configmap_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["get", "configmap", name, "-n", namespace, "-o", "json"])
}

pub fn create_configmap_args(
    name: &str,
    namespace: &str,
    data: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut args = base(&["create", "configmap", name]);
    for (key, value) in data {
        args.push(format!("--from-literal={key}={value}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

/// Two-step update: (render with client-side dry-run, apply from stdin).
pub fn update_configmap_args(
    name: &str,
    namespace: &str,
    data: &BTreeMap<String, String>,
) -> (Vec<String>, Vec<String>) {
    let mut render = create_configmap_args(name, namespace, data);
    render.push("--dry-run=client".to_string());
    render.push("-o".to_string());
    render.push("yaml".to_string());

    let apply = base(&["apply", "-f", "-", "-n", namespace]);
    (render, apply)
}

pub fn delete_configmap_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["delete", "configmap", name, "-n", namespace])
}

/// Project a configmap capture down to its key list and data.
pub fn shape_configmap(raw: &str) -> Result<String> {
    let cm = parse_json(raw)?;
    let keys: Vec<String> = cm["data"]
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    Ok(pretty(&json!({
        "name": cm["metadata"]["name"],
        "namespace": cm["metadata"]["namespace"],
        "keys": keys,
        "data": cm["data"],
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn create_renders_literals_in_key_order() {
        let args = create_configmap_args("app-cfg", "web", &data(&[("b", "2"), ("a", "1")]));
        assert_eq!(
            args,
            vec![
                "create", "configmap", "app-cfg",
                "--from-literal=a=1", "--from-literal=b=2",
                "-n", "web"
            ]
        );
    }

    #[test]
    fn update_is_render_then_apply() {
        let (render, apply) = update_configmap_args("app-cfg", "web", &data(&[("a", "1")]));
        assert!(render.contains(&"--dry-run=client".to_string()));
        assert_eq!(&render[render.len() - 2..], &["-o".to_string(), "yaml".to_string()][..]);
        assert_eq!(apply, vec!["apply", "-f", "-", "-n", "web"]);
    }

    #[test]
    fn literal_values_with_spaces_stay_single_tokens() {
        let args = create_configmap_args("c", "default", &data(&[("motd", "hello world")]));
        assert!(args.contains(&"--from-literal=motd=hello world".to_string()));
    }

    #[test]
    fn shape_configmap_lists_keys() {
        let raw = r#"{
            "metadata": {"name": "app-cfg", "namespace": "web"},
            "data": {"LOG_LEVEL": "info", "PORT": "8080"}
        }"#;
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_configmap(raw).unwrap()).unwrap();
        assert_eq!(shaped["keys"], json!(["LOG_LEVEL", "PORT"]));
        assert_eq!(shaped["data"]["PORT"], "8080");
    }
}
