//! Domain layer for the authenticator
//!
//! This module contains the configuration value types the rest of the
//! program consumes.

pub mod models;

pub use models::{Config, RoleMapping};
