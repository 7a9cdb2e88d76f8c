//! Implementation of the `validate` command.

use anyhow::Result;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::{ConfigResolver, Registry};

/// Summary of a successful validation
#[derive(Debug, serde::Serialize)]
pub struct ValidateOutput {
    /// Always `true`; failures are reported as errors
    pub valid: bool,
    /// Resolved cluster ID
    pub cluster_id: String,
    /// Number of static role mappings
    pub role_mappings: usize,
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        format!(
            "Configuration is valid for cluster {} ({} static role mapping(s))",
            self.cluster_id, self.role_mappings
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Resolve the configuration and report that it is valid.
pub fn execute(registry: &Registry, json_mode: bool) -> Result<()> {
    let config = ConfigResolver::resolve(registry)?;

    let output_data = ValidateOutput {
        valid: true,
        cluster_id: config.cluster_id,
        role_mappings: config.static_role_mappings.len(),
    };
    output(&output_data, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{keys, FlagValue};

    #[test]
    fn test_human_output() {
        let output_data = ValidateOutput {
            valid: true,
            cluster_id: "prod-1".to_string(),
            role_mappings: 2,
        };
        assert_eq!(
            output_data.to_human(),
            "Configuration is valid for cluster prod-1 (2 static role mapping(s))"
        );
        assert_eq!(output_data.to_json()["valid"], true);
    }

    #[test]
    fn test_execute_reports_validation_failure() {
        let registry = Registry::new();
        let err = execute(&registry, true).unwrap_err();
        assert_eq!(err.to_string(), "cluster ID cannot be empty");

        let mut registry = Registry::new();
        registry.bind_flag(keys::CLUSTER_ID, FlagValue::explicit("prod-1"));
        assert!(execute(&registry, true).is_ok());
    }
}
