/*!
Request parameter structs for the MCP tool catalog.

Each struct is deserialized from the tool-call argument mapping and doubles
as the advertised argument schema (schemars derive, re-exported by rmcp).
`namespace` is optional everywhere namespaced: the server substitutes the
configured default namespace exactly once, before building arguments.
*/

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListParams {
    #[schemars(description = "Namespace to list in (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "List across all namespaces instead of one")]
    pub all_namespaces: Option<bool>,
    #[schemars(description = "Label selector, e.g. app=web")]
    pub label_selector: Option<String>,
    #[schemars(description = "Field selector, e.g. status.phase=Running")]
    pub field_selector: Option<String>,
}

/// Namespace/all-namespaces scoping only (lists without selector support).
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScopeParams {
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Operate across all namespaces")]
    pub all_namespaces: Option<bool>,
}

/// Name plus optional namespace (get / describe / delete of one resource).
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NamedParams {
    #[schemars(description = "Resource name")]
    pub name: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeletePodParams {
    #[schemars(description = "Pod name")]
    pub name: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Force-delete immediately (--force --grace-period=0)")]
    pub force: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PodLogsParams {
    #[schemars(description = "Pod name")]
    pub name: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Container name when the pod has more than one")]
    pub container: Option<String>,
    #[schemars(description = "Only the last N lines")]
    pub tail: Option<i64>,
    #[schemars(description = "Logs of the previous container instance")]
    pub previous: Option<bool>,
    #[schemars(description = "Relative time window, e.g. 5m or 1h")]
    pub since: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExecParams {
    #[schemars(description = "Pod name")]
    pub name: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Container name when the pod has more than one")]
    pub container: Option<String>,
    #[schemars(description = "Shell command to run inside the container (via sh -c)")]
    pub command: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateDeploymentParams {
    #[schemars(description = "Deployment name")]
    pub name: String,
    #[schemars(description = "Container image, e.g. nginx:1.27")]
    pub image: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Desired replica count")]
    pub replicas: Option<u32>,
    #[schemars(description = "Container port to expose on the pod spec")]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleParams {
    #[schemars(description = "Deployment name")]
    pub name: String,
    #[schemars(description = "Target replica count")]
    pub replicas: u32,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AutoscaleParams {
    #[schemars(description = "Deployment name")]
    pub name: String,
    #[schemars(description = "Minimum replicas")]
    pub min_replicas: u32,
    #[schemars(description = "Maximum replicas")]
    pub max_replicas: u32,
    #[schemars(description = "Target average CPU utilization percent")]
    pub cpu_percent: Option<u32>,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetImageParams {
    #[schemars(description = "Deployment name")]
    pub name: String,
    #[schemars(description = "Container whose image to replace")]
    pub container: String,
    #[schemars(description = "New image reference")]
    pub image: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RolloutParams {
    #[schemars(description = "Workload name")]
    pub name: String,
    #[schemars(description = "Workload kind: deployment (default), daemonset, or statefulset")]
    pub kind: Option<String>,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RolloutUndoParams {
    #[schemars(description = "Workload name")]
    pub name: String,
    #[schemars(description = "Workload kind: deployment (default), daemonset, or statefulset")]
    pub kind: Option<String>,
    #[schemars(description = "Revision to roll back to (latest previous when omitted)")]
    pub revision: Option<u64>,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExposeParams {
    #[schemars(description = "Deployment to expose")]
    pub deployment: String,
    #[schemars(description = "Service port")]
    pub port: u16,
    #[schemars(description = "Container port the service forwards to")]
    pub target_port: Option<u16>,
    #[schemars(description = "Service type: ClusterIP, NodePort, or LoadBalancer")]
    pub service_type: Option<String>,
    #[schemars(description = "Service name (defaults to the deployment name)")]
    pub service_name: Option<String>,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

/// Literal key/value payload for configmap and secret creation.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeyValueParams {
    #[schemars(description = "Resource name")]
    pub name: String,
    #[schemars(description = "Key/value entries stored as --from-literal pairs")]
    pub data: BTreeMap<String, String>,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSecretParams {
    #[schemars(description = "Secret name")]
    pub name: String,
    #[schemars(description = "Namespace (defaults to the configured namespace)")]
    pub namespace: Option<String>,
    #[schemars(description = "Base64-decode the data values locally")]
    pub decode: Option<bool>,
}

/// Bare name (namespaces, nodes, contexts).
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NameParams {
    #[schemars(description = "Object name")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NodeListParams {
    #[schemars(description = "Label selector, e.g. node-role.kubernetes.io/worker=")]
    pub label_selector: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DrainParams {
    #[schemars(description = "Node name")]
    pub name: String,
    #[schemars(description = "Continue even for pods not managed by a controller")]
    pub force: Option<bool>,
    #[schemars(description = "Skip daemonset-managed pods")]
    pub ignore_daemonsets: Option<bool>,
    #[schemars(description = "Delete pods using emptyDir volumes")]
    pub delete_emptydir_data: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyParams {
    #[schemars(description = "YAML manifest (single or multi-document)")]
    pub manifest: String,
    #[schemars(description = "Namespace for objects without one (defaults to the configured namespace)")]
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResourceParams {
    #[schemars(description = "Resource kind, e.g. ingress, pvc, clusterrole")]
    pub kind: String,
    #[schemars(description = "Resource name")]
    pub name: String,
    #[schemars(description = "Namespace; omit for cluster-scoped kinds")]
    pub namespace: Option<String>,
}
