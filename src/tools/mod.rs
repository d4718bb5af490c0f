/*!
Pure per-operation logic for the tool dispatcher.

Each resource family gets one module holding two kinds of functions, kept
strictly separate so both are testable without spawning kubectl:
  - `*_args(...) -> Vec<String>`: build the kubectl argument list for one
    operation. No I/O, no defaults resolution (the server resolves the
    namespace exactly once before calling in here).
  - `shape_*(&str) -> Result<String>`: project a `get ... -o json` capture
    down to the curated field subset returned to the caller. List-style
    operations skip shaping and return kubectl's tabular text verbatim.

Modules:
  pods        - pod list/get/describe/delete/logs/exec/top
  deployments - deployment list/get/describe/create/scale/autoscale/set-image/delete
  rollout     - rollout status/history/undo/restart/pause/resume
  services    - service list/get/describe/expose/delete
  configmaps  - configmap list/get/create/update/delete
  secrets     - secret list/get(+decode)/create/delete
  cluster     - namespaces, events, nodes, top, contexts, apply, generic get/delete
*/

use anyhow::{Context, Result};

pub mod cluster;
pub mod configmaps;
pub mod deployments;
pub mod pods;
pub mod rollout;
pub mod secrets;
pub mod services;

/// Owned argument vector from static parts.
pub(crate) fn base(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Namespace scoping: `--all-namespaces` wins over the resolved namespace.
pub(crate) fn scope(namespace: &str, all_namespaces: bool) -> Vec<String> {
    if all_namespaces {
        base(&["--all-namespaces"])
    } else {
        base(&["-n", namespace])
    }
}

/// Parse a kubectl `-o json` capture.
pub(crate) fn parse_json(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).context("kubectl returned output that is not valid JSON")
}

/// Pretty-print a projected subset for the response body.
pub(crate) fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
