//! Infrastructure layer module
//!
//! - Configuration registry and resolver
//! - Logging infrastructure

pub mod config;
pub mod logging;
