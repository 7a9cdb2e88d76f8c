//! Implementation of the `show` command.

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::{keys, ConfigResolver, Registry, Source};

/// Resolved configuration plus where it came from
#[derive(Debug, serde::Serialize)]
pub struct ShowOutput {
    /// The resolved configuration
    #[serde(flatten)]
    pub config: Config,
    /// File that was loaded, if any
    pub config_file: Option<PathBuf>,
    /// Layer that supplied the cluster ID
    pub cluster_id_source: Option<Source>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let config = &self.config;
        let or_unset = |s: &str| if s.is_empty() { "(unset)".to_string() } else { s.to_string() };

        let mut lines = Vec::new();
        match &self.config_file {
            Some(path) => lines.push(format!("Config file:          {}", path.display())),
            None => lines.push("Config file:          (none)".to_string()),
        }
        let source = self
            .cluster_id_source
            .map(|s| format!(" (from {s})"))
            .unwrap_or_default();
        lines.push(format!("Cluster ID:           {}{source}", config.cluster_id));
        lines.push(format!("Localhost port:       {}", config.localhost_port));
        lines.push(format!(
            "Generate kubeconfig:  {}",
            or_unset(&config.generate_kubeconfig_path)
        ));
        lines.push(format!("State directory:      {}", or_unset(&config.state_dir)));
        lines.push(format!(
            "Static role mappings: {}",
            config.static_role_mappings.len()
        ));
        for mapping in &config.static_role_mappings {
            lines.push(format!(
                "  - {} -> {} [{}]",
                mapping.role_arn,
                mapping.username,
                mapping.groups.join(", ")
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolve the configuration and print it.
pub fn execute(registry: &Registry, json_mode: bool) -> Result<()> {
    let config = ConfigResolver::resolve(registry)?;

    let output_data = ShowOutput {
        config,
        config_file: registry.config_file_used().map(PathBuf::from),
        cluster_id_source: registry.source(keys::CLUSTER_ID),
    };
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RoleMapping;

    fn sample() -> ShowOutput {
        ShowOutput {
            config: Config {
                cluster_id: "prod-1".to_string(),
                localhost_port: 21362,
                static_role_mappings: vec![RoleMapping {
                    role_arn: "arn:aws:iam::000000000000:role/Admin".to_string(),
                    username: "admin".to_string(),
                    groups: vec!["system:masters".to_string()],
                }],
                ..Default::default()
            },
            config_file: None,
            cluster_id_source: Some(Source::Flag),
        }
    }

    #[test]
    fn test_human_output() {
        let text = sample().to_human();
        assert!(text.contains("Cluster ID:           prod-1 (from flag)"));
        assert!(text.contains("State directory:      (unset)"));
        assert!(text.contains("arn:aws:iam::000000000000:role/Admin -> admin [system:masters]"));
    }

    #[test]
    fn test_json_output() {
        let json = sample().to_json();
        assert_eq!(json["clusterID"], "prod-1");
        assert_eq!(json["cluster_id_source"], "flag");
        assert_eq!(json["mapRoles"][0]["username"], "admin");
        assert!(json["config_file"].is_null());
    }
}
