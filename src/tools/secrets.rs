/*!
`secrets.rs`

Argument builders and result shaping for secret operations.

The only local computation in the whole dispatcher lives here: with
`decode=true`, every `.data` value of the fetched secret is base64-decoded
(standard alphabet, the encoding kubectl uses). A value that is not valid
base64, or not UTF-8 once decoded, is passed through unchanged — partial
decodability must not hide the rest of the secret.
*/

use std::collections::BTreeMap;

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use super::{base, parse_json, pretty, scope};

pub fn list_secrets_args(namespace: &str, all_namespaces: bool) -> Vec<String> {
    let mut args = base(&["get", "secrets"]);
    args.extend(scope(namespace, all_namespaces));
    args
}

pub fn get_secret_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["get", "secret", name, "-n", namespace, "-o", "json"])
}

pub fn create_secret_args(
    name: &str,
    namespace: &str,
    data: &BTreeMap<String, String>,
) -> Vec<String> {
    let mut args = base(&["create", "secret", "generic", name]);
    for (key, value) in data {
        args.push(format!("--from-literal={key}={value}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

pub fn delete_secret_args(name: &str, namespace: &str) -> Vec<String> {
    base(&["delete", "secret", name, "-n", namespace])
}

/// Decode one base64 secret value; None when it does not decode to UTF-8.
fn decode_value(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Project a secret capture down to identity, type, and data — decoded
/// only when `decode` is set.
pub fn shape_secret(raw: &str, decode: bool) -> Result<String> {
    let secret = parse_json(raw)?;

    let data = match secret["data"].as_object() {
        Some(map) if decode => {
            let decoded: serde_json::Map<String, Value> = map
                .iter()
                .map(|(key, value)| {
                    let out = value
                        .as_str()
                        .and_then(decode_value)
                        .map(Value::String)
                        .unwrap_or_else(|| value.clone());
                    (key.clone(), out)
                })
                .collect();
            Value::Object(decoded)
        }
        Some(map) => Value::Object(map.clone()),
        None => Value::Null,
    };

    Ok(pretty(&json!({
        "name": secret["metadata"]["name"],
        "namespace": secret["metadata"]["namespace"],
        "type": secret["type"],
        "decoded": decode,
        "data": data,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "metadata": {"name": "db-credentials", "namespace": "web"},
        "type": "Opaque",
        "data": {"username": "YWRtaW4=", "password": "aHVudGVyMg=="}
    }"#;

    #[test]
    fn create_uses_generic_subcommand() {
        let mut data = BTreeMap::new();
        data.insert("token".to_string(), "abc".to_string());
        assert_eq!(
            create_secret_args("api-token", "web", &data),
            vec!["create", "secret", "generic", "api-token", "--from-literal=token=abc", "-n", "web"]
        );
    }

    #[test]
    fn undecode_keeps_base64_values() {
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_secret(RAW, false).unwrap()).unwrap();
        assert_eq!(shaped["data"]["username"], "YWRtaW4=");
        assert_eq!(shaped["decoded"], false);
    }

    #[test]
    fn decode_flag_decodes_each_value() {
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_secret(RAW, true).unwrap()).unwrap();
        assert_eq!(shaped["data"]["username"], "admin");
        assert_eq!(shaped["data"]["password"], "hunter2");
        assert_eq!(shaped["decoded"], true);
    }

    #[test]
    fn undecodable_value_passes_through() {
        let raw = r#"{
            "metadata": {"name": "s", "namespace": "web"},
            "type": "Opaque",
            "data": {"ok": "aGk=", "bad": "%%%not-base64%%%"}
        }"#;
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_secret(raw, true).unwrap()).unwrap();
        assert_eq!(shaped["data"]["ok"], "hi");
        assert_eq!(shaped["data"]["bad"], "%%%not-base64%%%");
    }

    #[test]
    fn secret_without_data_shapes_to_null() {
        let raw = r#"{"metadata": {"name": "s", "namespace": "web"}, "type": "Opaque"}"#;
        let shaped: serde_json::Value =
            serde_json::from_str(&shape_secret(raw, true).unwrap()).unwrap();
        assert!(shaped["data"].is_null());
    }
}
