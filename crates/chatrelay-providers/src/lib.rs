//! LLM provider layer for Chatrelay.
//!
//! # Architecture
//!
//! - [`traits::ChatProvider`] — trait that all adapters implement
//! - [`direct::DirectProvider`] — one-shot OpenAI-compatible HTTP client
//! - [`agent::AgentProvider`] — agent runner with per-call sessions
//! - [`session::InMemorySessionService`] — concurrent session registry
//! - [`factory::create_provider`] — adapter selection from the config tag

pub mod agent;
pub mod direct;
pub mod factory;
pub mod session;
pub mod traits;

// Re-export main types for convenience
pub use agent::{AgentProvider, NO_RESPONSE_SENTINEL};
pub use direct::DirectProvider;
pub use factory::create_provider;
pub use session::InMemorySessionService;
pub use traits::{ChatProvider, GenerationParams};
