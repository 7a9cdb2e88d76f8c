//! Common test utilities for integration tests
//!
//! Shared fixtures for writing configuration documents and building a
//! registry the way the binary does.

use std::io::Write;

use kubernetes_aws_authenticator::cli::{build_registry, parse_args};
use kubernetes_aws_authenticator::{ConfigError, Registry};
use tempfile::NamedTempFile;

/// Write `contents` to a temporary file whose name ends in `suffix`
///
/// The file is removed when the returned handle is dropped.
#[allow(dead_code)]
pub fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("authenticator-")
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file.flush().expect("Failed to flush temp config");
    file
}

/// Serialize `document` as YAML into a temporary `.yaml` file
#[allow(dead_code)]
pub fn write_yaml<T: serde::Serialize>(document: &T) -> NamedTempFile {
    let yaml = serde_yaml::to_string(document).expect("Failed to serialize YAML fixture");
    write_config(".yaml", &yaml)
}

/// Parse `args` (without the program name) and build the registry
#[allow(dead_code)]
pub fn registry_from_args(args: &[&str]) -> Result<Registry, ConfigError> {
    let argv = std::iter::once("kubernetes-aws-authenticator").chain(args.iter().copied());
    let (cli, matches) = parse_args(argv).expect("arguments should parse");
    build_registry(&cli, &matches)
}
