//! Turns a populated registry into a validated [`Config`].

use tracing::debug;

use super::error::ConfigError;
use super::keys;
use super::registry::Registry;
use crate::domain::models::{Config, RoleMapping};

/// Builds the validated [`Config`] from a populated [`Registry`]
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve the configuration once.
    ///
    /// Fails on the first problem found: a `server.mapRoles` value that does
    /// not decode, or an empty cluster ID. No partial configuration is ever
    /// returned.
    pub fn resolve(registry: &Registry) -> Result<Config, ConfigError> {
        let cluster_id = registry.get_string(keys::CLUSTER_ID);
        let localhost_port = registry.get_int(keys::SERVER_PORT);
        let generate_kubeconfig_path = registry.get_string(keys::GENERATE_KUBECONFIG);
        let state_dir = registry.get_string(keys::STATE_DIR);
        let static_role_mappings: Vec<RoleMapping> = registry.decode(keys::MAP_ROLES)?;

        let config = Config {
            cluster_id,
            localhost_port,
            generate_kubeconfig_path,
            state_dir,
            static_role_mappings,
        };

        Self::validate(&config)?;

        debug!(
            cluster_id = %config.cluster_id,
            localhost_port = config.localhost_port,
            role_mappings = config.static_role_mappings.len(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Validate a resolved configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.cluster_id.is_empty() {
            return Err(ConfigError::Validation("cluster ID cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::FlagValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn registry_from_yaml(yaml: &str) -> (NamedTempFile, Registry) {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        write!(file, "{yaml}").unwrap();
        file.flush().unwrap();

        let mut registry = Registry::new();
        registry.load_file(file.path()).unwrap();
        (file, registry)
    }

    #[test]
    fn test_resolve_full_config() {
        let (_file, registry) = registry_from_yaml(
            r"
clusterID: west-1
server:
  port: 21362
  generateKubeconfig: /etc/kubernetes/authenticator.kubeconfig
  stateDir: /var/authenticator
  mapRoles:
    - roleARN: arn:aws:iam::000000000000:role/KubernetesAdmin
      username: kubernetes-admin
      groups:
        - system:masters
",
        );

        let config = ConfigResolver::resolve(&registry).expect("config should resolve");

        assert_eq!(config.cluster_id, "west-1");
        assert_eq!(config.localhost_port, 21362);
        assert_eq!(
            config.generate_kubeconfig_path,
            "/etc/kubernetes/authenticator.kubeconfig"
        );
        assert_eq!(config.state_dir, "/var/authenticator");
        assert_eq!(
            config.static_role_mappings,
            vec![RoleMapping {
                role_arn: "arn:aws:iam::000000000000:role/KubernetesAdmin".to_string(),
                username: "kubernetes-admin".to_string(),
                groups: vec!["system:masters".to_string()],
            }]
        );
    }

    #[test]
    fn test_resolve_defaults_optional_fields() {
        let mut registry = Registry::new();
        registry.bind_flag(keys::CLUSTER_ID, FlagValue::explicit("prod-1"));

        let config = ConfigResolver::resolve(&registry).unwrap();
        assert_eq!(
            config,
            Config {
                cluster_id: "prod-1".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_resolve_empty_cluster_id() {
        let registry = Registry::new();

        let err = ConfigResolver::resolve(&registry).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg == "cluster ID cannot be empty")
        );
    }

    #[test]
    fn test_decode_failure_wins_over_validation() {
        // Cluster ID is also missing; the decode error must be reported first.
        let (_file, registry) = registry_from_yaml("server:\n  mapRoles: not-a-list\n");

        let err = ConfigResolver::resolve(&registry).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { ref key, .. } if key == keys::MAP_ROLES));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (_file, registry) = registry_from_yaml(
            "clusterID: west-1\nserver:\n  mapRoles:\n    - rolearn: a\n    - rolearn: b\n",
        );

        let first = ConfigResolver::resolve(&registry).unwrap();
        let second = ConfigResolver::resolve(&registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate() {
        assert!(ConfigResolver::validate(&Config::default()).is_err());

        let config = Config {
            cluster_id: "x".to_string(),
            localhost_port: -1,
            ..Default::default()
        };
        assert!(ConfigResolver::validate(&config).is_ok());
    }
}
