//! Provider factory — adapter selection from the configured tag.
//!
//! Pure selection logic: no retries, no caching of failed attempts. Runs at
//! startup, before the HTTP listener binds, so a bad tag or missing secret
//! fails the process before any connection is accepted.

use std::sync::Arc;

use tracing::debug;

use chatrelay_core::config::ProviderSettings;
use chatrelay_core::error::ProviderError;

use crate::agent::AgentProvider;
use crate::direct::DirectProvider;
use crate::traits::ChatProvider;

/// Construct the single process-wide provider instance from settings.
///
/// # Errors
/// [`ProviderError::UnsupportedProvider`] for an unrecognized tag,
/// [`ProviderError::MissingCredential`] when the API key is absent.
pub fn create_provider(settings: &ProviderSettings) -> Result<Arc<dyn ChatProvider>, ProviderError> {
    if !settings.is_configured() {
        return Err(ProviderError::MissingCredential(settings.provider.clone()));
    }

    debug!(
        provider = %settings.provider,
        model = %settings.model,
        api_base = settings.api_base.as_deref().unwrap_or("default"),
        "creating provider"
    );

    match settings.provider.as_str() {
        "direct" => Ok(Arc::new(DirectProvider::new(settings)?)),
        "agent" => Ok(Arc::new(AgentProvider::new(settings)?)),
        other => Err(ProviderError::UnsupportedProvider(other.to_string())),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
