//! Provider error taxonomy.
//!
//! Every failure a provider can produce is one of these variants. The HTTP
//! layer translates them into status codes exactly once, at the transport
//! edge — no raw upstream payloads ever reach a caller.

use thiserror::Error;

/// Errors raised by provider construction and generation calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured provider tag matches no known adapter. Fatal at startup.
    #[error("unsupported provider type: {0}")]
    UnsupportedProvider(String),

    /// A required secret is absent from the configuration. Fatal at startup.
    #[error("missing API key for provider `{0}`")]
    MissingCredential(String),

    /// Construction-time setup failed (bad client config, unreadable files).
    #[error("failed to initialize provider: {0}")]
    Configuration(String),

    /// The one distinguished 502-class case: the upstream model backend
    /// returned a server-side failure and the caller may retry.
    #[error("upstream backend error, please retry: {0}")]
    UpstreamOverload(String),

    /// Any other failure from the remote call (auth, decode, network).
    #[error("generation error: {0}")]
    Remote(String),
}

impl ProviderError {
    /// Whether the caller may retry (maps to a 502 at the HTTP edge).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::UpstreamOverload(_))
    }
}
