//! Configuration management infrastructure
//!
//! Layered configuration for the authenticator:
//! - Explicit command-line flags
//! - Environment variable bindings
//! - A YAML, JSON or TOML configuration file
//! - Validation into the typed [`Config`](crate::domain::models::Config)

pub mod error;
pub mod registry;
pub mod resolver;

pub use error::{ConfigError, ConfigFileError};
pub use registry::{FlagValue, Registry, Source};
pub use resolver::ConfigResolver;

/// Registry keys read by [`ConfigResolver`]
pub mod keys {
    /// Unique-per-cluster identifier
    pub const CLUSTER_ID: &str = "clusterID";
    /// Local listen port
    pub const SERVER_PORT: &str = "server.port";
    /// Output path for a generated kubeconfig
    pub const GENERATE_KUBECONFIG: &str = "server.generateKubeconfig";
    /// Persisted state directory
    pub const STATE_DIR: &str = "server.stateDir";
    /// Static IAM role mappings
    pub const MAP_ROLES: &str = "server.mapRoles";
}

/// Environment variable bound to [`keys::CLUSTER_ID`]
pub const CLUSTER_ID_ENV: &str = "KUBERNETES_AWS_AUTHENTICATOR_CLUSTER_ID";
