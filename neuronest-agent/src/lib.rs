//! Chat session control for neuronest
//!
//! This crate owns the conversation session and drives the single
//! in-flight request to the completion API.

pub mod controller;

pub use controller::ChatController;
