//! Provider trait — the capability every backend adapter implements.
//!
//! One adapter is constructed per process from [`crate::factory::create_provider`]
//! and shared across all concurrent requests behind an `Arc`.

use async_trait::async_trait;
use chatrelay_core::config::GenerationDefaults;
use chatrelay_core::error::ProviderError;

/// Generation parameters for a single call.
#[derive(Clone, Debug)]
pub struct GenerationParams {
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f64,
    /// Maximum tokens to generate. `None` leaves the remote default in place.
    pub max_tokens: Option<u32>,
}

impl From<&GenerationDefaults> for GenerationParams {
    fn from(defaults: &GenerationDefaults) -> Self {
        Self {
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

// The configured defaults are the single source of the default values.
impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&GenerationDefaults::default())
    }
}

/// Trait that all chat providers implement.
///
/// Implementations hold only immutable configuration; any per-call session
/// state is minted inside `generate` and discarded with it.
#[async_trait]
pub trait ChatProvider: Send + Sync + std::fmt::Debug {
    /// Turn a user message plus generation parameters into generated text.
    ///
    /// # Errors
    /// [`ProviderError::UpstreamOverload`] when the remote backend fails
    /// server-side (the caller may retry); [`ProviderError::Remote`] for any
    /// other remote failure. No raw upstream error escapes unformatted.
    async fn generate(
        &self,
        message: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// The adapter tag this instance was constructed from (for `/health`).
    fn tag(&self) -> &str;

    /// The remote model this instance targets.
    fn model(&self) -> &str;
}
