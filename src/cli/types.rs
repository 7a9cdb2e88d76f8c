//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infrastructure::logging::LogFormat;

/// Top-level command-line arguments
#[derive(Parser, Debug)]
#[command(name = "kubernetes-aws-authenticator")]
#[command(about = "A tool to authenticate to Kubernetes using AWS IAM credentials", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from `filename`
    #[arg(short, long, value_name = "filename", global = true)]
    pub config: Option<PathBuf>,

    /// Specify the cluster `ID`, a unique-per-cluster identifier for your
    /// kubernetes-aws-authenticator installation.
    #[arg(short = 'i', long, value_name = "ID", global = true)]
    pub cluster_id: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log line format (text, json)
    #[arg(long, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the configuration and print it
    Show,

    /// Resolve the configuration and report whether it is valid
    Validate,
}
