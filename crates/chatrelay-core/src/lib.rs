//! Core building blocks for Chatrelay.
//!
//! - [`types`] — wire types for OpenAI-compatible chat completions
//! - [`config`] — typed configuration schema + loader (JSON file + env vars)
//! - [`error`] — the provider error taxonomy shared across crates

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ProviderError;
