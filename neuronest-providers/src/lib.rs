//! Generative-language API integration for neuronest
//!
//! [`GeminiClient`] speaks the `generateContent` REST API, and
//! [`ApiGateway`] wraps any [`ChatProvider`] so that every outcome, including
//! failures, comes back as an ordinary model [`Turn`](neuronest_core::Turn).

pub mod base;
pub mod gateway;
pub mod gemini;

pub use base::{ChatProvider, ProviderError, ProviderResult};
pub use gateway::{ApiGateway, ERROR_FALLBACK, MALFORMED_FALLBACK};
pub use gemini::GeminiClient;
