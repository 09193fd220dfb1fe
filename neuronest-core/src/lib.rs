//! Core types and utilities for neuronest
//!
//! This crate provides the conversation data model, the view selector,
//! configuration loading and logging setup shared by the other crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod utils;
pub mod view;

pub use error::{Error, Result};
pub use session::{Role, Session, Turn};
pub use view::{Section, Tab};
