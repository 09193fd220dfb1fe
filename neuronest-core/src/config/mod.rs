//! Configuration management
//!
//! Handles loading and validation of neuronest configuration from
//! `config.json` and environment variables.

pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::ConfigLoader;
pub use schema::*;
