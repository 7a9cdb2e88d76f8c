//! Kubernetes AWS Authenticator - configuration layer
//!
//! Resolves the authenticator's runtime [`Config`] from three layered
//! sources: explicit command-line flags, environment variables and an
//! optional YAML, JSON or TOML configuration file.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the resolved configuration value types
//! - **Infrastructure Layer** (`infrastructure`): the layered registry, the
//!   resolver and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use kubernetes_aws_authenticator::{keys, ConfigResolver, FlagValue, Registry, CLUSTER_ID_ENV};
//!
//! let mut registry = Registry::new();
//! registry.bind_flag(keys::CLUSTER_ID, FlagValue::explicit("prod-1"));
//! registry.bind_env(keys::CLUSTER_ID, CLUSTER_ID_ENV);
//! registry.load_file("/etc/kubernetes-aws-authenticator/config.yaml")?;
//!
//! let config = ConfigResolver::resolve(&registry)?;
//! assert_eq!(config.cluster_id, "prod-1");
//! # Ok::<(), kubernetes_aws_authenticator::ConfigError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{Config, RoleMapping};
pub use infrastructure::config::{
    keys, ConfigError, ConfigFileError, ConfigResolver, FlagValue, Registry, Source,
    CLUSTER_ID_ENV,
};
