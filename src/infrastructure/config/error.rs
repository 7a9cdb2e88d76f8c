//! Errors raised while loading and resolving configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file was named but could not be read or parsed.
    #[error("Can't read configuration file {path:?}: {source}")]
    ConfigFile {
        /// File that was requested
        path: PathBuf,
        /// What went wrong reading it
        #[source]
        source: ConfigFileError,
    },

    /// The value stored under `key` does not fit the requested shape.
    #[error("invalid value for {key}: {source}")]
    Decode {
        /// Key whose value failed to decode
        key: String,
        /// Decoder failure
        #[source]
        source: Box<figment::Error>,
    },

    /// A required field is missing or empty after resolution.
    #[error("{0}")]
    Validation(String),
}

/// Underlying cause of a [`ConfigError::ConfigFile`].
#[derive(Error, Debug)]
pub enum ConfigFileError {
    /// The file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file contents are not a valid document
    #[error(transparent)]
    Parse(Box<figment::Error>),

    /// The file extension names no known format
    #[error("unsupported config type {0:?}")]
    UnsupportedFormat(String),
}

impl From<figment::Error> for ConfigFileError {
    fn from(err: figment::Error) -> Self {
        Self::Parse(Box::new(err))
    }
}

impl ConfigError {
    /// Registry key involved in the failure, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Decode { key, .. } => Some(key),
            _ => None,
        }
    }
}
