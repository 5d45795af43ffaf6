//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProviderSettings`, `ServerSettings`,
//! `GenerationDefaults`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! `#[serde(rename_all = "camelCase")]` handles the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `./chatrelay.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub provider: ProviderSettings,
    pub server: ServerSettings,
    pub generation: GenerationDefaults,
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Settings for the single active LLM provider.
///
/// Read once at startup; the constructed provider instance is immutable for
/// the process lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// Adapter tag: `"direct"` or `"agent"`.
    pub provider: String,
    /// API key for authentication. Required non-empty at startup.
    #[serde(default)]
    pub api_key: String,
    /// Remote model identifier.
    pub model: String,
    /// Custom API base URL (overrides the built-in default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// HTTP client timeout passthrough. Absent = client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    /// System prompt file for the agent adapter. Falls back to a built-in
    /// instruction when the file is absent.
    pub system_prompt_path: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: "direct".to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_base: None,
            timeout_seconds: None,
            system_prompt_path: "./prompts/system_prompt".to_string(),
        }
    }
}

impl ProviderSettings {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Directory holding the static root page (`index.html`).
    pub static_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: "./static".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Generation defaults
// ─────────────────────────────────────────────

/// Defaults applied when a chat request omits generation parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationDefaults {
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f64,
    /// Maximum tokens to generate. `null` means omit from upstream requests
    /// and let the remote model's own default apply.
    pub max_tokens: Option<u32>,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: Some(2048),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
