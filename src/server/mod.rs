/*!
MCP server surface: one `#[tool]` method per cluster operation.

Every handler follows the same straight line: resolve the namespace (explicit
value wins, otherwise the configured default, exactly once), build the kubectl
argument list with the pure builders in `crate::tools`, hand it to the
executor, then flag the outcome:
  - nonzero exit / spawn failure / timeout -> error-flagged result carrying
    the captured error text verbatim
  - success -> raw captured text, or a curated JSON projection for the
    single-resource get_* operations

Handlers return `Result<CallToolResult, ErrorData>` but the Err arm is never
taken: every failure mode is folded into an error-flagged result so a failed
kubectl call is data for the client, not a protocol error.

Unknown tool names never reach a handler: the rmcp tool router rejects them
with its fixed "tool not found" error before any process is spawned.

Calls are independent; each owns its spawned process and there is no shared
mutable state between them.
*/

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorData as McpError, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::exec::{ExecOutput, Executor};
use crate::tools::{cluster, configmaps, deployments, pods, rollout, secrets, services};
use crate::utils::{MAX_OUTPUT_CHARS, truncate_output};

mod params;
use params::*;

#[derive(Clone)]
pub struct KubectlServer {
    executor: Arc<Executor>,
    default_namespace: String,
    tool_router: ToolRouter<Self>,
}

impl KubectlServer {
    pub fn new(config: &Config) -> Self {
        KubectlServer {
            executor: Arc::new(Executor::from_config(config)),
            default_namespace: config.namespace.clone(),
            tool_router: Self::tool_router(),
        }
    }

    /// Resolve the effective namespace: explicit argument wins, otherwise
    /// the configured default. Called once per tool invocation.
    fn ns<'a>(&'a self, requested: &'a Option<String>) -> &'a str {
        requested.as_deref().unwrap_or(&self.default_namespace)
    }

    fn ok(text: String) -> CallToolResult {
        CallToolResult::success(vec![Content::text(truncate_output(&text, MAX_OUTPUT_CHARS))])
    }

    fn err(text: String) -> CallToolResult {
        CallToolResult::error(vec![Content::text(truncate_output(&text, MAX_OUTPUT_CHARS))])
    }

    fn flag(output: ExecOutput) -> CallToolResult {
        if output.success() {
            Self::ok(output.stdout)
        } else {
            Self::err(output.failure_text())
        }
    }

    /// Run one invocation and return its text verbatim.
    async fn run_raw(&self, args: Vec<String>) -> Result<CallToolResult, McpError> {
        Ok(Self::flag(self.executor.run(&args, None).await))
    }

    /// Run one invocation with text piped on stdin.
    async fn run_with_stdin(
        &self,
        args: Vec<String>,
        input: &str,
    ) -> Result<CallToolResult, McpError> {
        Ok(Self::flag(self.executor.run(&args, Some(input)).await))
    }

    /// Run one invocation and project the JSON capture on success.
    async fn run_shaped(
        &self,
        args: Vec<String>,
        shape: fn(&str) -> anyhow::Result<String>,
    ) -> Result<CallToolResult, McpError> {
        let output = self.executor.run(&args, None).await;
        if !output.success() {
            return Ok(Self::err(output.failure_text()));
        }
        Ok(match shape(&output.stdout) {
            Ok(text) => Self::ok(text),
            Err(err) => Self::err(format!("{err:#}")),
        })
    }
}

#[tool_router]
impl KubectlServer {
    /* ---- Pods ---- */

    #[tool(description = "List pods in a namespace (or all namespaces), optionally filtered by label/field selector. Returns kubectl's tabular output.")]
    async fn list_pods(
        &self,
        Parameters(p): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(pods::list_pods_args(
            ns,
            p.all_namespaces.unwrap_or(false),
            p.label_selector.as_deref(),
            p.field_selector.as_deref(),
        ))
        .await
    }

    #[tool(description = "Get one pod as a JSON summary: phase, node, IP, labels, and per-container image/readiness/restarts.")]
    async fn get_pod(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_shaped(pods::get_pod_args(&p.name, ns), pods::shape_pod).await
    }

    #[tool(description = "Describe one pod (full kubectl describe text, including events).")]
    async fn describe_pod(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(pods::describe_pod_args(&p.name, ns)).await
    }

    #[tool(description = "Delete a pod. Set force=true for immediate deletion with zero grace period.")]
    async fn delete_pod(
        &self,
        Parameters(p): Parameters<DeletePodParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(pods::delete_pod_args(&p.name, ns, p.force.unwrap_or(false))).await
    }

    #[tool(description = "Fetch container logs from a pod, with optional container, tail, previous, and since filters.")]
    async fn get_pod_logs(
        &self,
        Parameters(p): Parameters<PodLogsParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(pods::pod_logs_args(
            &p.name,
            ns,
            p.container.as_deref(),
            p.tail,
            p.previous.unwrap_or(false),
            p.since.as_deref(),
        ))
        .await
    }

    #[tool(description = "Run a shell command inside a pod container (sh -c). A nonzero exit status is reported as an error result; the command's combined stdout and stderr is always included.")]
    async fn exec_in_pod(
        &self,
        Parameters(p): Parameters<ExecParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        let args = pods::exec_in_pod_args(&p.name, ns, p.container.as_deref(), &p.command);
        let output = self.executor.run(&args, None).await;
        let combined = if output.stderr.trim().is_empty() {
            output.stdout.clone()
        } else if output.stdout.trim().is_empty() {
            output.stderr.clone()
        } else {
            format!("{}\n{}", output.stdout, output.stderr)
        };
        Ok(if output.success() {
            Self::ok(combined)
        } else {
            let status = match output.exit_code {
                Some(code) => format!("exit code {code}"),
                None => "no exit code".to_string(),
            };
            Self::err(format!("command failed ({status})\n{combined}"))
        })
    }

    #[tool(description = "Pod CPU/memory usage via metrics-server (kubectl top pods).")]
    async fn top_pods(
        &self,
        Parameters(p): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(pods::top_pods_args(ns, p.all_namespaces.unwrap_or(false))).await
    }

    /* ---- Deployments ---- */

    #[tool(description = "List deployments in a namespace (or all namespaces). Returns kubectl's tabular output.")]
    async fn list_deployments(
        &self,
        Parameters(p): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::list_deployments_args(
            ns,
            p.all_namespaces.unwrap_or(false),
            p.label_selector.as_deref(),
        ))
        .await
    }

    #[tool(description = "Get one deployment as a JSON summary: replica counts, strategy, images, and conditions.")]
    async fn get_deployment(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_shaped(deployments::get_deployment_args(&p.name, ns), deployments::shape_deployment)
            .await
    }

    #[tool(description = "Describe one deployment (full kubectl describe text).")]
    async fn describe_deployment(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::describe_deployment_args(&p.name, ns)).await
    }

    #[tool(description = "Create a deployment from an image, with optional replica count and container port.")]
    async fn create_deployment(
        &self,
        Parameters(p): Parameters<CreateDeploymentParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::create_deployment_args(&p.name, &p.image, ns, p.replicas, p.port))
            .await
    }

    #[tool(description = "Scale a deployment to an exact replica count.")]
    async fn scale_deployment(
        &self,
        Parameters(p): Parameters<ScaleParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        let output = self
            .executor
            .run(&deployments::scale_deployment_args(&p.name, ns, p.replicas), None)
            .await;
        Ok(if output.success() {
            Self::ok(format!("{}\nreplicas set to {}", output.stdout.trim_end(), p.replicas))
        } else {
            Self::err(output.failure_text())
        })
    }

    #[tool(description = "Attach a horizontal pod autoscaler to a deployment (min/max replicas, optional CPU percent target).")]
    async fn autoscale_deployment(
        &self,
        Parameters(p): Parameters<AutoscaleParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::autoscale_deployment_args(
            &p.name,
            ns,
            p.min_replicas,
            p.max_replicas,
            p.cpu_percent,
        ))
        .await
    }

    #[tool(description = "Replace the image of one container in a deployment (kubectl set image).")]
    async fn set_deployment_image(
        &self,
        Parameters(p): Parameters<SetImageParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::set_deployment_image_args(&p.name, ns, &p.container, &p.image))
            .await
    }

    #[tool(description = "Delete a deployment.")]
    async fn delete_deployment(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(deployments::delete_deployment_args(&p.name, ns)).await
    }

    /* ---- Rollouts ---- */

    #[tool(description = "Watchless rollout status of a deployment, daemonset, or statefulset.")]
    async fn rollout_status(
        &self,
        Parameters(p): Parameters<RolloutParams>,
    ) -> Result<CallToolResult, McpError> {
        self.rollout(rollout::RolloutVerb::Status, &p, None).await
    }

    #[tool(description = "Revision history of a rollout-capable workload.")]
    async fn rollout_history(
        &self,
        Parameters(p): Parameters<RolloutParams>,
    ) -> Result<CallToolResult, McpError> {
        self.rollout(rollout::RolloutVerb::History, &p, None).await
    }

    #[tool(description = "Roll a workload back to the previous revision, or to an explicit revision number.")]
    async fn rollout_undo(
        &self,
        Parameters(p): Parameters<RolloutUndoParams>,
    ) -> Result<CallToolResult, McpError> {
        let inner = RolloutParams { name: p.name, kind: p.kind, namespace: p.namespace };
        self.rollout(rollout::RolloutVerb::Undo, &inner, p.revision).await
    }

    #[tool(description = "Trigger a rolling restart of a workload.")]
    async fn rollout_restart(
        &self,
        Parameters(p): Parameters<RolloutParams>,
    ) -> Result<CallToolResult, McpError> {
        self.rollout(rollout::RolloutVerb::Restart, &p, None).await
    }

    #[tool(description = "Pause a rollout so spec changes accumulate without triggering restarts.")]
    async fn rollout_pause(
        &self,
        Parameters(p): Parameters<RolloutParams>,
    ) -> Result<CallToolResult, McpError> {
        self.rollout(rollout::RolloutVerb::Pause, &p, None).await
    }

    #[tool(description = "Resume a paused rollout.")]
    async fn rollout_resume(
        &self,
        Parameters(p): Parameters<RolloutParams>,
    ) -> Result<CallToolResult, McpError> {
        self.rollout(rollout::RolloutVerb::Resume, &p, None).await
    }

    /* ---- Services ---- */

    #[tool(description = "List services in a namespace (or all namespaces). Returns kubectl's tabular output.")]
    async fn list_services(
        &self,
        Parameters(p): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(services::list_services_args(ns, p.all_namespaces.unwrap_or(false))).await
    }

    #[tool(description = "Get one service as a JSON summary: type, cluster IP, selector, and port mappings.")]
    async fn get_service(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_shaped(services::get_service_args(&p.name, ns), services::shape_service).await
    }

    #[tool(description = "Describe one service (full kubectl describe text).")]
    async fn describe_service(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(services::describe_service_args(&p.name, ns)).await
    }

    #[tool(description = "Expose a deployment as a service (kubectl expose), with optional target port, type, and service name.")]
    async fn expose_deployment(
        &self,
        Parameters(p): Parameters<ExposeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(services::expose_deployment_args(
            &p.deployment,
            ns,
            p.port,
            p.target_port,
            p.service_type.as_deref(),
            p.service_name.as_deref(),
        ))
        .await
    }

    #[tool(description = "Delete a service.")]
    async fn delete_service(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(services::delete_service_args(&p.name, ns)).await
    }

    /* ---- ConfigMaps ---- */

    #[tool(description = "List configmaps in a namespace (or all namespaces).")]
    async fn list_configmaps(
        &self,
        Parameters(p): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(configmaps::list_configmaps_args(ns, p.all_namespaces.unwrap_or(false))).await
    }

    #[tool(description = "Get one configmap as a JSON summary with its key list and data.")]
    async fn get_configmap(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_shaped(configmaps::get_configmap_args(&p.name, ns), configmaps::shape_configmap)
            .await
    }

    #[tool(description = "Create a configmap from literal key/value entries.")]
    async fn create_configmap(
        &self,
        Parameters(p): Parameters<KeyValueParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(configmaps::create_configmap_args(&p.name, ns, &p.data)).await
    }

    #[tool(description = "Create or replace a configmap's data from literal key/value entries (client-side dry-run rendered, then applied).")]
    async fn update_configmap(
        &self,
        Parameters(p): Parameters<KeyValueParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        let (render_args, apply_args) = configmaps::update_configmap_args(&p.name, ns, &p.data);
        let rendered = self.executor.run(&render_args, None).await;
        if !rendered.success() {
            return Ok(Self::err(rendered.failure_text()));
        }
        self.run_with_stdin(apply_args, &rendered.stdout).await
    }

    #[tool(description = "Delete a configmap.")]
    async fn delete_configmap(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(configmaps::delete_configmap_args(&p.name, ns)).await
    }

    /* ---- Secrets ---- */

    #[tool(description = "List secrets in a namespace (or all namespaces). Values are never included in the listing.")]
    async fn list_secrets(
        &self,
        Parameters(p): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(secrets::list_secrets_args(ns, p.all_namespaces.unwrap_or(false))).await
    }

    #[tool(description = "Get one secret as a JSON summary. Set decode=true to base64-decode the data values locally; values that do not decode cleanly are passed through unchanged.")]
    async fn get_secret(
        &self,
        Parameters(p): Parameters<GetSecretParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        let output = self.executor.run(&secrets::get_secret_args(&p.name, ns), None).await;
        if !output.success() {
            return Ok(Self::err(output.failure_text()));
        }
        Ok(match secrets::shape_secret(&output.stdout, p.decode.unwrap_or(false)) {
            Ok(text) => Self::ok(text),
            Err(err) => Self::err(format!("{err:#}")),
        })
    }

    #[tool(description = "Create a generic secret from literal key/value entries.")]
    async fn create_secret(
        &self,
        Parameters(p): Parameters<KeyValueParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(secrets::create_secret_args(&p.name, ns, &p.data)).await
    }

    #[tool(description = "Delete a secret.")]
    async fn delete_secret(
        &self,
        Parameters(p): Parameters<NamedParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(secrets::delete_secret_args(&p.name, ns)).await
    }

    /* ---- Namespaces & events ---- */

    #[tool(description = "List all namespaces in the cluster.")]
    async fn list_namespaces(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::list_namespaces_args()).await
    }

    #[tool(description = "Create a namespace.")]
    async fn create_namespace(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::create_namespace_args(&p.name)).await
    }

    #[tool(description = "Delete a namespace and everything in it.")]
    async fn delete_namespace(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::delete_namespace_args(&p.name)).await
    }

    #[tool(description = "Recent cluster events sorted by time, for one namespace or all of them.")]
    async fn get_events(
        &self,
        Parameters(p): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let ns = self.ns(&p.namespace);
        self.run_raw(cluster::get_events_args(ns, p.all_namespaces.unwrap_or(false))).await
    }

    /* ---- Nodes & metrics ---- */

    #[tool(description = "List cluster nodes (wide output), optionally filtered by label selector.")]
    async fn list_nodes(
        &self,
        Parameters(p): Parameters<NodeListParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::list_nodes_args(p.label_selector.as_deref())).await
    }

    #[tool(description = "Describe one node (capacity, conditions, allocated resources).")]
    async fn describe_node(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::describe_node_args(&p.name)).await
    }

    #[tool(description = "Mark a node unschedulable.")]
    async fn cordon_node(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::cordon_node_args(&p.name)).await
    }

    #[tool(description = "Mark a node schedulable again.")]
    async fn uncordon_node(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::uncordon_node_args(&p.name)).await
    }

    #[tool(description = "Drain a node in preparation for maintenance (optionally forcing unmanaged pods, ignoring daemonsets, and deleting emptyDir data).")]
    async fn drain_node(
        &self,
        Parameters(p): Parameters<DrainParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::drain_node_args(
            &p.name,
            p.force.unwrap_or(false),
            p.ignore_daemonsets.unwrap_or(false),
            p.delete_emptydir_data.unwrap_or(false),
        ))
        .await
    }

    #[tool(description = "Node CPU/memory usage via metrics-server (kubectl top nodes).")]
    async fn top_nodes(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::top_nodes_args()).await
    }

    /* ---- Contexts ---- */

    #[tool(description = "List the contexts known to the client's kubeconfig.")]
    async fn list_contexts(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::list_contexts_args()).await
    }

    #[tool(description = "Show the currently selected kubeconfig context.")]
    async fn current_context(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::current_context_args()).await
    }

    #[tool(description = "Switch the kubeconfig's current context.")]
    async fn use_context(
        &self,
        Parameters(p): Parameters<NameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::use_context_args(&p.name)).await
    }

    /* ---- Generic ---- */

    #[tool(description = "Apply a YAML manifest (single or multi-document). The manifest is validated locally before kubectl is invoked.")]
    async fn apply_manifest(
        &self,
        Parameters(p): Parameters<ApplyParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(err) = cluster::validate_manifest(&p.manifest) {
            return Ok(Self::err(format!("{err:#}")));
        }
        let ns = self.ns(&p.namespace);
        self.run_with_stdin(cluster::apply_manifest_args(ns), &p.manifest).await
    }

    #[tool(description = "Fetch any resource by kind and name as raw JSON. Omit the namespace for cluster-scoped kinds.")]
    async fn get_resource(
        &self,
        Parameters(p): Parameters<ResourceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::get_resource_args(&p.kind, &p.name, p.namespace.as_deref())).await
    }

    #[tool(description = "Delete any resource by kind and name. Omit the namespace for cluster-scoped kinds.")]
    async fn delete_resource(
        &self,
        Parameters(p): Parameters<ResourceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::delete_resource_args(&p.kind, &p.name, p.namespace.as_deref())).await
    }

    #[tool(description = "Control plane and core service endpoints (kubectl cluster-info).")]
    async fn cluster_info(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::cluster_info_args()).await
    }

    #[tool(description = "List the API resource kinds the cluster serves.")]
    async fn api_resources(&self) -> Result<CallToolResult, McpError> {
        self.run_raw(cluster::api_resources_args()).await
    }
}

impl KubectlServer {
    async fn rollout(
        &self,
        verb: rollout::RolloutVerb,
        p: &RolloutParams,
        revision: Option<u64>,
    ) -> Result<CallToolResult, McpError> {
        let kind = match rollout::resolve_kind(p.kind.as_deref()) {
            Ok(kind) => kind,
            Err(err) => return Ok(Self::err(format!("{err:#}"))),
        };
        let ns = self.ns(&p.namespace);
        self.run_raw(rollout::rollout_args(verb, kind, &p.name, ns, revision)).await
    }
}

#[tool_handler]
impl ServerHandler for KubectlServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "kubectl bridge - manage a Kubernetes cluster through kubectl. \
                Tools cover pods, deployments, services, configmaps, secrets, \
                rollouts, namespaces, nodes, metrics, and kubeconfig contexts. \
                A tool's namespace argument defaults to the server's configured \
                namespace when omitted. Every call runs one kubectl invocation \
                (locally or over SSH, per server configuration) and returns its \
                output; failures carry kubectl's error text."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;

    fn server() -> KubectlServer {
        KubectlServer::new(&Config::from_lookup(|_| None, &Overrides::default()))
    }

    #[test]
    fn catalog_advertises_expected_tools() {
        let tools = KubectlServer::tool_router().list_all();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for expected in [
            "list_pods",
            "get_pod",
            "exec_in_pod",
            "get_pod_logs",
            "scale_deployment",
            "rollout_undo",
            "expose_deployment",
            "update_configmap",
            "get_secret",
            "create_namespace",
            "drain_node",
            "top_nodes",
            "use_context",
            "apply_manifest",
            "get_resource",
        ] {
            assert!(names.contains(&expected), "catalog is missing '{expected}'");
        }
        assert!(tools.len() >= 50, "expected a full catalog, got {}", tools.len());
    }

    #[test]
    fn tool_names_are_unique() {
        let tools = KubectlServer::tool_router().list_all();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate tool names in the catalog");
    }

    #[test]
    fn namespace_defaults_exactly_to_configured_value() {
        let server = server();
        assert_eq!(server.ns(&None), "default");
        assert_eq!(server.ns(&Some("web".to_string())), "web");
    }

    #[tokio::test]
    async fn failed_invocation_is_error_flagged() {
        // Default config points at "kubectl"; if absent the spawn failure
        // path is exercised, if present the bogus flag makes it exit nonzero.
        let server = server();
        let result = server
            .run_raw(vec!["--definitely-not-a-kubectl-flag".to_string()])
            .await
            .expect("failures surface as error-flagged results, never Err");
        assert_eq!(result.is_error, Some(true));
    }
}
