use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

mod config;
mod exec;
mod server;
mod tools;
mod utils;

use config::{Config, Overrides};
use server::KubectlServer;

/// kubectl-mcp - MCP server exposing kubectl cluster operations
///
/// Speaks MCP over stdio (stdout is the protocol channel; all logging goes
/// to stderr). Every tool call becomes one kubectl invocation, run locally
/// or over SSH on a remote host.
///
/// Configuration (flag > env > fallback):
///   --kubeconfig   / KUBECONFIG_PATH       kubeconfig file (local mode)
///   --context      / KUBECTL_CONTEXT       kubeconfig context (local mode)
///   --namespace    / KUBECTL_NAMESPACE     default namespace ("default")
///   --kubectl-bin  / KUBECTL_BIN           client binary ("kubectl")
///   --timeout      / KUBECTL_TIMEOUT_SECS  per-call timeout (60)
///                    SSH_HOST              presence switches to remote mode
///                    SSH_USER / SSH_KEY_PATH / SSH_PASSWORD
///
/// Examples:
///   kubectl-mcp
///   kubectl-mcp --namespace staging --timeout 120 -v
///   SSH_HOST=10.0.0.5 SSH_KEY_PATH=~/.ssh/id_ed25519 kubectl-mcp
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-mcp",
    version,
    about = "MCP server exposing kubectl cluster-management operations as tools",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Kubeconfig file path (overrides KUBECONFIG_PATH)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<String>,

    /// Kubeconfig context name (overrides KUBECTL_CONTEXT)
    #[arg(long, value_name = "NAME")]
    context: Option<String>,

    /// Default namespace for tools that omit one (overrides KUBECTL_NAMESPACE)
    #[arg(short = 'n', long, value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// kubectl binary name or path (overrides KUBECTL_BIN)
    #[arg(long = "kubectl-bin", value_name = "PATH")]
    kubectl_bin: Option<String>,

    /// Per-call timeout in seconds (overrides KUBECTL_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr only; stdout carries the protocol)
    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let config = Config::from_env(&Overrides {
        kubeconfig: cli.kubeconfig,
        context: cli.context,
        namespace: cli.namespace,
        kubectl_bin: cli.kubectl_bin,
        timeout_secs: cli.timeout,
    });
    crate::log_info!("starting kubectl-mcp: {}", config.describe());

    let service = match KubectlServer::new(&config).serve((stdin(), stdout())).await {
        Ok(service) => service,
        Err(err) => {
            crate::log_error!("failed to start MCP service: {err:#}");
            return Err(err.into());
        }
    };
    service.waiting().await?;

    crate::log_info!("client disconnected; shutting down");
    Ok(())
}
