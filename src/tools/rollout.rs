/*!
`rollout.rs`

Argument builders for `kubectl rollout` verbs over the rollout-capable
workload kinds (deployment, daemonset, statefulset). All rollout output is
returned verbatim, so this module has no shaping functions.
*/

use anyhow::{Result, bail};

use super::base;

/// Workload kinds `kubectl rollout` accepts.
const ROLLOUT_KINDS: &[&str] = &["deployment", "daemonset", "statefulset"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutVerb {
    Status,
    History,
    Undo,
    Restart,
    Pause,
    Resume,
}

impl RolloutVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolloutVerb::Status => "status",
            RolloutVerb::History => "history",
            RolloutVerb::Undo => "undo",
            RolloutVerb::Restart => "restart",
            RolloutVerb::Pause => "pause",
            RolloutVerb::Resume => "resume",
        }
    }
}

/// Validate a caller-supplied workload kind, defaulting to `deployment`.
pub fn resolve_kind(kind: Option<&str>) -> Result<&str> {
    match kind {
        None => Ok("deployment"),
        Some(k) => {
            let normalized = k.trim().to_ascii_lowercase();
            match ROLLOUT_KINDS.iter().copied().find(|allowed| *allowed == normalized) {
                Some(allowed) => Ok(allowed),
                None => bail!(
                    "unsupported rollout kind '{k}' (expected one of: {})",
                    ROLLOUT_KINDS.join(", ")
                ),
            }
        }
    }
}

pub fn rollout_args(
    verb: RolloutVerb,
    kind: &str,
    name: &str,
    namespace: &str,
    revision: Option<u64>,
) -> Vec<String> {
    let mut args = base(&["rollout", verb.as_str()]);
    args.push(format!("{kind}/{name}"));
    if let Some(rev) = revision {
        // Only meaningful for undo/history; kubectl rejects it elsewhere.
        args.push(format!("--to-revision={rev}"));
    }
    args.push("-n".to_string());
    args.push(namespace.to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_for_default_kind() {
        let kind = resolve_kind(None).unwrap();
        assert_eq!(
            rollout_args(RolloutVerb::Status, kind, "web", "web", None),
            vec!["rollout", "status", "deployment/web", "-n", "web"]
        );
    }

    #[test]
    fn undo_with_revision() {
        assert_eq!(
            rollout_args(RolloutVerb::Undo, "deployment", "web", "default", Some(4)),
            vec!["rollout", "undo", "deployment/web", "--to-revision=4", "-n", "default"]
        );
    }

    #[test]
    fn kind_is_case_insensitive() {
        assert_eq!(resolve_kind(Some("StatefulSet")).unwrap(), "statefulset");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = resolve_kind(Some("cronjob")).unwrap_err();
        assert!(err.to_string().contains("unsupported rollout kind"));
    }

    #[test]
    fn restart_pause_resume_verbs() {
        for (verb, word) in [
            (RolloutVerb::Restart, "restart"),
            (RolloutVerb::Pause, "pause"),
            (RolloutVerb::Resume, "resume"),
            (RolloutVerb::History, "history"),
        ] {
            let args = rollout_args(verb, "daemonset", "agent", "kube-system", None);
            assert_eq!(args[1], word);
            assert_eq!(args[2], "daemonset/agent");
        }
    }
}
