//! Configuration value types.

pub mod config;

pub use config::{Config, RoleMapping};
