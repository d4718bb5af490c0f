/*!
Command execution (local kubectl vs remote-shell-wrapped kubectl).

ExecTarget { Local | Remote } is chosen once at startup from configuration;
Executor::run spawns exactly one process per call and captures
stdout / stderr / exit status. No retries, no shared state.

Failure surface:
  - spawn error  -> captured as a failed ExecOutput (exit_code None)
  - nonzero exit -> reported via ExecOutput (callers flag it)
  - timeout      -> child killed, failed ExecOutput naming the timeout
*/

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::Config;

/// Captured result of one external-process invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    /// `Some(code)` when the process exited normally; `None` on spawn
    /// failure, signal death, or timeout.
    pub exit_code: Option<i32>,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Error text for a failed invocation: stderr verbatim, falling back to
    /// stdout, falling back to a generic exit-status line.
    pub fn failure_text(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.clone()
        } else if !self.stdout.trim().is_empty() {
            self.stdout.clone()
        } else {
            match self.exit_code {
                Some(code) => format!("command failed with exit code {code}"),
                None => "command terminated without an exit code".to_string(),
            }
        }
    }

    fn failed(message: String) -> Self {
        ExecOutput { stdout: String::new(), stderr: message, exit_code: None }
    }
}

/// Where and how kubectl is invoked. Selected once from configuration:
/// presence of a remote host switches to the remote-shell path.
#[derive(Debug, Clone)]
pub enum ExecTarget {
    /// Direct invocation of the client binary on this host.
    Local {
        kubectl_bin: String,
        kubeconfig: Option<String>,
        context: Option<String>,
    },
    /// Invocation wrapped in a secure-shell session; the remote host's own
    /// kubectl configuration governs, so no kubeconfig/context flags here.
    Remote {
        kubectl_bin: String,
        host: String,
        user: String,
        key_path: Option<String>,
        password: Option<String>,
    },
}

impl ExecTarget {
    pub fn from_config(config: &Config) -> Self {
        match &config.ssh {
            Some(ssh) => ExecTarget::Remote {
                kubectl_bin: config.kubectl_bin.clone(),
                host: ssh.host.clone(),
                user: ssh.user.clone(),
                key_path: ssh.key_path.clone(),
                password: ssh.password.clone(),
            },
            None => ExecTarget::Local {
                kubectl_bin: config.kubectl_bin.clone(),
                kubeconfig: config.kubeconfig.clone(),
                context: config.context.clone(),
            },
        }
    }

    /// Resolve the operation argument list into the (program, argv) pair
    /// that is actually spawned.
    ///
    /// Local: kubectl itself, with --kubeconfig/--context prepended when set.
    /// Remote: an ssh client running `sudo kubectl ...` as a single shell
    /// string, shell-quoted so arguments containing spaces or quotes survive.
    pub fn command_line(&self, op_args: &[String]) -> (String, Vec<String>) {
        match self {
            ExecTarget::Local { kubectl_bin, kubeconfig, context } => {
                let mut argv = Vec::with_capacity(op_args.len() + 4);
                if let Some(path) = kubeconfig {
                    argv.push("--kubeconfig".to_string());
                    argv.push(path.clone());
                }
                if let Some(name) = context {
                    argv.push("--context".to_string());
                    argv.push(name.clone());
                }
                argv.extend(op_args.iter().cloned());
                (kubectl_bin.clone(), argv)
            }
            ExecTarget::Remote { kubectl_bin, host, user, key_path, password } => {
                let remote_cmd = remote_command(kubectl_bin, op_args);
                let login = format!("{user}@{host}");
                match (key_path, password) {
                    (Some(key), _) => (
                        "ssh".to_string(),
                        vec![
                            "-i".to_string(),
                            key.clone(),
                            "-o".to_string(),
                            "BatchMode=yes".to_string(),
                            "-o".to_string(),
                            "StrictHostKeyChecking=accept-new".to_string(),
                            login,
                            "--".to_string(),
                            remote_cmd,
                        ],
                    ),
                    (None, Some(pw)) => password_command_line(&login, pw, remote_cmd),
                    (None, None) => (
                        // No credentials configured: rely on the ssh agent.
                        "ssh".to_string(),
                        vec![
                            "-o".to_string(),
                            "BatchMode=yes".to_string(),
                            "-o".to_string(),
                            "StrictHostKeyChecking=accept-new".to_string(),
                            login,
                            "--".to_string(),
                            remote_cmd,
                        ],
                    ),
                }
            }
        }
    }
}

/// Elevated kubectl command string for the remote shell. `shell_words::join`
/// quotes every token that contains spaces, quotes, or other specials.
fn remote_command(kubectl_bin: &str, op_args: &[String]) -> String {
    let mut tokens: Vec<&str> = Vec::with_capacity(op_args.len() + 1);
    tokens.push(kubectl_bin);
    tokens.extend(op_args.iter().map(String::as_str));
    format!("sudo {}", shell_words::join(tokens))
}

/// Password-auth fallback helper; the helper binary differs by platform.
#[cfg(not(windows))]
fn password_command_line(login: &str, password: &str, remote_cmd: String) -> (String, Vec<String>) {
    (
        "sshpass".to_string(),
        vec![
            "-p".to_string(),
            password.to_string(),
            "ssh".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            login.to_string(),
            "--".to_string(),
            remote_cmd,
        ],
    )
}

#[cfg(windows)]
fn password_command_line(login: &str, password: &str, remote_cmd: String) -> (String, Vec<String>) {
    (
        "plink".to_string(),
        vec![
            "-batch".to_string(),
            "-pw".to_string(),
            password.to_string(),
            login.to_string(),
            remote_cmd,
        ],
    )
}

/// Spawns kubectl invocations against a fixed target with a per-call timeout.
#[derive(Debug, Clone)]
pub struct Executor {
    target: ExecTarget,
    timeout: Duration,
}

impl Executor {
    pub fn new(target: ExecTarget, timeout: Duration) -> Self {
        Executor { target, timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Executor::new(ExecTarget::from_config(config), config.timeout())
    }

    /// Run one kubectl operation, optionally feeding `input` on stdin
    /// (ssh forwards stdin to the remote command, so both paths accept it).
    ///
    /// Never returns Err: spawn failures and timeouts are folded into the
    /// ExecOutput so a wedged or missing client cannot take the call down
    /// with a panic or an unhandled error.
    pub async fn run(&self, op_args: &[String], input: Option<&str>) -> ExecOutput {
        // Log the operation arguments only; the full command line may carry
        // an ssh password in the sshpass/plink fallback.
        crate::log_debug!("kubectl {}", shell_words::join(op_args.iter().map(String::as_str)));
        let (program, argv) = self.target.command_line(op_args);

        let mut command = Command::new(&program);
        command
            .args(&argv)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                return ExecOutput::failed(format!("failed to spawn '{program}': {err}"));
            }
        };

        // The stdin write must run under the same deadline as the wait: a
        // child that never drains its pipe would otherwise block write_all
        // forever once the input outgrows the pipe buffer.
        let io = async {
            if let Some(text) = input
                && let Some(mut stdin) = child.stdin.take()
            {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|err| format!("failed to write stdin to '{program}': {err}"))?;
                // Dropping closes the pipe so the child sees EOF.
                drop(stdin);
            }
            child
                .wait_with_output()
                .await
                .map_err(|err| format!("failed to collect output from '{program}': {err}"))
        };

        match timeout(self.timeout, io).await {
            Ok(Ok(output)) => ExecOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
            },
            Ok(Err(message)) => ExecOutput::failed(message),
            // kill_on_drop reaps the abandoned child.
            Err(_) => ExecOutput::failed(format!(
                "command timed out after {}s: {program}",
                self.timeout.as_secs()
            )),
        }
    }
}
