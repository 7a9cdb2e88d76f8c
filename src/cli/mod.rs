//! Command-line interface
//!
//! Parses arguments, fills the configuration [`Registry`] from flags, the
//! environment and the `--config` file, and dispatches to a command.

pub mod commands;
pub mod output;
pub mod types;

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

pub use types::{Cli, Commands};

use crate::infrastructure::config::{keys, ConfigError, FlagValue, Registry, CLUSTER_ID_ENV};

/// Parse `args`, keeping the raw matches so explicitly supplied flags can be
/// told apart from defaults.
pub fn parse_args<I, T>(args: I) -> Result<(Cli, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    Ok((cli, matches))
}

/// Bind flags and environment variables, then load the `--config` file.
pub fn build_registry(cli: &Cli, matches: &ArgMatches) -> Result<Registry, ConfigError> {
    let mut registry = Registry::new();

    registry.bind_flag(
        keys::CLUSTER_ID,
        FlagValue::from_matches::<String>(matches, "cluster_id"),
    );
    registry.bind_env(keys::CLUSTER_ID, CLUSTER_ID_ENV);

    if let Some(path) = &cli.config {
        registry.load_file(path)?;
    }

    Ok(registry)
}

/// Report a command failure and exit with a non-zero status.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": format!("{err:#}") });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry_without_config_file() {
        let (cli, matches) =
            parse_args(["kubernetes-aws-authenticator", "-i", "prod-1", "show"]).unwrap();
        let registry = build_registry(&cli, &matches).unwrap();

        assert_eq!(registry.get_string(keys::CLUSTER_ID), "prod-1");
        assert!(registry.config_file_used().is_none());
    }

    #[test]
    fn test_build_registry_missing_config_file() {
        let (cli, matches) = parse_args([
            "kubernetes-aws-authenticator",
            "--config",
            "/nonexistent/config.yaml",
            "validate",
        ])
        .unwrap();

        let err = build_registry(&cli, &matches).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFile { .. }));
    }
}
