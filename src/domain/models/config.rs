//! Resolved configuration and role mapping records.

use serde::{Deserialize, Serialize};

/// Resolved runtime configuration for the authenticator.
///
/// Built once per process by
/// [`ConfigResolver`](crate::infrastructure::config::ConfigResolver) and
/// treated as read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Unique-per-installation cluster identifier. Never empty once resolved.
    #[serde(rename = "clusterID")]
    pub cluster_id: String,

    /// Local listen port, `0` when unset
    #[serde(rename = "localhostPort")]
    pub localhost_port: i64,

    /// Where to write a generated kubeconfig. Empty means "do not generate".
    #[serde(rename = "generateKubeconfig")]
    pub generate_kubeconfig_path: String,

    /// Directory for persisted state. Empty means none is configured.
    #[serde(rename = "stateDir")]
    pub state_dir: String,

    /// Static IAM role mappings, in the order they appear in the source
    #[serde(rename = "mapRoles")]
    pub static_role_mappings: Vec<RoleMapping>,
}

/// Maps an IAM role to a Kubernetes user name and groups.
///
/// Only decoded structurally: missing fields take their zero value and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleMapping {
    /// ARN of the IAM role
    #[serde(rename = "rolearn")]
    pub role_arn: String,

    /// Kubernetes user name the role maps to
    pub username: String,

    /// Kubernetes groups granted to the role
    pub groups: Vec<String>,
}
