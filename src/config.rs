/*!
`config.rs`

Runtime configuration for the kubectl-mcp server.

Sources (highest precedence first):
  1. CLI flags (clap, see `main.rs`)
  2. Environment variables
  3. Built-in fallbacks ("kubectl", "default", 60s timeout)

Environment variables:
  KUBECONFIG_PATH       path passed as --kubeconfig (local mode only)
  KUBECTL_CONTEXT       context passed as --context (local mode only)
  KUBECTL_NAMESPACE     default namespace when a tool omits one
  KUBECTL_BIN           kubectl binary name/path
  KUBECTL_TIMEOUT_SECS  per-call timeout for spawned processes
  SSH_HOST              presence switches execution to remote mode
  SSH_USER              remote user (fallback "root")
  SSH_KEY_PATH          private key for key-based auth (preferred)
  SSH_PASSWORD          password auth fallback (sshpass / plink helper)

Empty or whitespace-only values are treated as unset, mirroring the
MCP_TARGET handling this server's CLI always had.

Parsing is written over an injectable lookup so tests never have to mutate
the process environment.
*/

use std::time::Duration;

/// Default namespace applied when a tool call omits one.
pub const DEFAULT_NAMESPACE: &str = "default";
/// Default kubectl binary.
pub const DEFAULT_KUBECTL_BIN: &str = "kubectl";
/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Remote-shell settings. Presence of this struct (i.e. of SSH_HOST)
/// switches the executor to remote mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    pub host: String,
    pub user: String,
    /// Key-based auth, preferred when set.
    pub key_path: Option<String>,
    /// Password auth fallback, used only when no key path is set.
    pub password: Option<String>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub kubectl_bin: String,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub namespace: String,
    pub timeout_secs: u64,
    pub ssh: Option<SshConfig>,
}

/// CLI-provided overrides (flag > env precedence).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub namespace: Option<String>,
    pub kubectl_bin: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Build configuration from the process environment plus CLI overrides.
    pub fn from_env(overrides: &Overrides) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, overrides: &Overrides) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let ssh = get("SSH_HOST").map(|host| SshConfig {
            host,
            user: get("SSH_USER").unwrap_or_else(|| "root".to_string()),
            key_path: get("SSH_KEY_PATH"),
            password: get("SSH_PASSWORD"),
        });

        // A zero timeout would fail every call before kubectl ran; treat it
        // like an unparsable value.
        let timeout_secs = overrides
            .timeout_secs
            .or_else(|| get("KUBECTL_TIMEOUT_SECS").and_then(|s| s.parse().ok()))
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Config {
            kubectl_bin: overrides
                .kubectl_bin
                .clone()
                .or_else(|| get("KUBECTL_BIN"))
                .unwrap_or_else(|| DEFAULT_KUBECTL_BIN.to_string()),
            kubeconfig: overrides.kubeconfig.clone().or_else(|| get("KUBECONFIG_PATH")),
            context: overrides.context.clone().or_else(|| get("KUBECTL_CONTEXT")),
            namespace: overrides
                .namespace
                .clone()
                .or_else(|| get("KUBECTL_NAMESPACE"))
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            timeout_secs,
            ssh,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.ssh.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// One-line summary for startup logging (never includes secrets).
    pub fn describe(&self) -> String {
        match &self.ssh {
            Some(ssh) => format!(
                "mode=remote host={} user={} auth={} namespace={} timeout={}s",
                ssh.host,
                ssh.user,
                if ssh.key_path.is_some() {
                    "key"
                } else if ssh.password.is_some() {
                    "password"
                } else {
                    "agent"
                },
                self.namespace,
                self.timeout_secs
            ),
            None => format!(
                "mode=local bin={} context={} namespace={} timeout={}s",
                self.kubectl_bin,
                self.context.as_deref().unwrap_or("-"),
                self.namespace,
                self.timeout_secs
            ),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(|_| None, &Overrides::default());
        assert_eq!(cfg.kubectl_bin, "kubectl");
        assert_eq!(cfg.namespace, "default");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(cfg.kubeconfig.is_none());
        assert!(!cfg.is_remote());
    }

    #[test]
    fn env_values_are_picked_up() {
        let pairs = [
            ("KUBECONFIG_PATH", "/home/u/.kube/config"),
            ("KUBECTL_CONTEXT", "staging"),
            ("KUBECTL_NAMESPACE", "web"),
            ("KUBECTL_BIN", "/usr/local/bin/kubectl"),
            ("KUBECTL_TIMEOUT_SECS", "15"),
        ];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        assert_eq!(cfg.kubeconfig.as_deref(), Some("/home/u/.kube/config"));
        assert_eq!(cfg.context.as_deref(), Some("staging"));
        assert_eq!(cfg.namespace, "web");
        assert_eq!(cfg.kubectl_bin, "/usr/local/bin/kubectl");
        assert_eq!(cfg.timeout_secs, 15);
    }

    #[test]
    fn cli_overrides_beat_env() {
        let pairs = [("KUBECTL_NAMESPACE", "env-ns"), ("KUBECTL_TIMEOUT_SECS", "15")];
        let overrides = Overrides {
            namespace: Some("cli-ns".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let cfg = Config::from_lookup(lookup(&pairs), &overrides);
        assert_eq!(cfg.namespace, "cli-ns");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn ssh_host_presence_switches_to_remote() {
        let pairs = [("SSH_HOST", "10.0.0.5"), ("SSH_KEY_PATH", "/root/.ssh/id_ed25519")];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        assert!(cfg.is_remote());
        let ssh = cfg.ssh.unwrap();
        assert_eq!(ssh.host, "10.0.0.5");
        assert_eq!(ssh.user, "root", "user falls back to root");
        assert_eq!(ssh.key_path.as_deref(), Some("/root/.ssh/id_ed25519"));
    }

    #[test]
    fn blank_values_treated_as_unset() {
        let pairs = [("SSH_HOST", "   "), ("KUBECTL_NAMESPACE", "")];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        assert!(!cfg.is_remote(), "whitespace host must not enable remote mode");
        assert_eq!(cfg.namespace, "default");
    }

    #[test]
    fn unparsable_timeout_falls_back() {
        let pairs = [("KUBECTL_TIMEOUT_SECS", "soon")];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn zero_timeout_falls_back() {
        let pairs = [("KUBECTL_TIMEOUT_SECS", "0")];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let overrides = Overrides { timeout_secs: Some(0), ..Default::default() };
        let cfg = Config::from_lookup(|_| None, &overrides);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn describe_never_leaks_password() {
        let pairs = [("SSH_HOST", "h"), ("SSH_PASSWORD", "hunter2")];
        let cfg = Config::from_lookup(lookup(&pairs), &Overrides::default());
        let line = cfg.describe();
        assert!(line.contains("auth=password"));
        assert!(!line.contains("hunter2"));
    }
}
