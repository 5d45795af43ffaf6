//! Config loader — reads `./chatrelay.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `./chatrelay.json` (or an explicit path)
//! 3. Environment variables `CHATRELAY_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    PathBuf::from("./chatrelay.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed. A missing API key is not an error here — the provider factory
/// rejects it before the server binds.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `CHATRELAY_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `CHATRELAY_PROVIDER__PROVIDER` → `provider.provider`
/// - `CHATRELAY_PROVIDER__API_KEY` → `provider.api_key`
/// - `CHATRELAY_PROVIDER__API_BASE` → `provider.api_base`
/// - `CHATRELAY_PROVIDER__MODEL` → `provider.model`
/// - `CHATRELAY_PROVIDER__SYSTEM_PROMPT_PATH` → `provider.system_prompt_path`
/// - `CHATRELAY_SERVER__HOST` → `server.host`
/// - `CHATRELAY_SERVER__PORT` → `server.port`
/// - `CHATRELAY_SERVER__STATIC_DIR` → `server.static_dir`
/// - `CHATRELAY_GENERATION__TEMPERATURE` → `generation.temperature`
/// - `CHATRELAY_GENERATION__MAX_TOKENS` → `generation.max_tokens`
fn apply_env_overrides(mut config: Config) -> Config {
    // Provider
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__PROVIDER") {
        config.provider.provider = val;
    }
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__API_BASE") {
        config.provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__MODEL") {
        config.provider.model = val;
    }
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__SYSTEM_PROMPT_PATH") {
        config.provider.system_prompt_path = val;
    }
    if let Ok(val) = std::env::var("CHATRELAY_PROVIDER__TIMEOUT_SECONDS") {
        if let Ok(t) = val.parse::<u64>() {
            config.provider.timeout_seconds = Some(t);
        }
    }

    // Server
    if let Ok(val) = std::env::var("CHATRELAY_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("CHATRELAY_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }
    if let Ok(val) = std::env::var("CHATRELAY_SERVER__STATIC_DIR") {
        config.server.static_dir = val;
    }

    // Generation defaults
    if let Ok(val) = std::env::var("CHATRELAY_GENERATION__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.generation.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("CHATRELAY_GENERATION__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.generation.max_tokens = Some(n);
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    // Every test here passes through apply_env_overrides, and env vars are
    // process-global, so the env-mutating tests must not interleave with the
    // file-loading ones.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let _guard = env_guard();
        let config = load_config_from_path(Path::new("/nonexistent/path/chatrelay.json"));
        // Should return defaults
        assert_eq!(config.provider.provider, "direct");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_valid_json() {
        let _guard = env_guard();
        let file = write_temp_json(
            r#"{
            "provider": {
                "provider": "agent",
                "apiKey": "sk-file",
                "model": "gpt-4o"
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.provider, "agent");
        assert_eq!(config.provider.api_key, "sk-file");
        assert_eq!(config.provider.model, "gpt-4o");
        // Default preserved
        assert_eq!(config.generation.temperature, 0.7);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let _guard = env_guard();
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.provider, "direct");
    }

    #[test]
    fn test_load_empty_json() {
        let _guard = env_guard();
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_env_override_api_key() {
        let _guard = env_guard();
        std::env::set_var("CHATRELAY_PROVIDER__API_KEY", "sk-env-key");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("CHATRELAY_PROVIDER__API_KEY");
        assert_eq!(config.provider.api_key, "sk-env-key");
    }

    #[test]
    fn test_env_override_provider_tag() {
        let _guard = env_guard();
        std::env::set_var("CHATRELAY_PROVIDER__PROVIDER", "agent");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("CHATRELAY_PROVIDER__PROVIDER");
        assert_eq!(config.provider.provider, "agent");
    }

    #[test]
    fn test_env_override_port() {
        let _guard = env_guard();
        std::env::set_var("CHATRELAY_SERVER__PORT", "9999");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("CHATRELAY_SERVER__PORT");
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = env_guard();
        std::env::set_var("CHATRELAY_SERVER__PORT", "not-a-port");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("CHATRELAY_SERVER__PORT");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_env_override_temperature() {
        let _guard = env_guard();
        std::env::set_var("CHATRELAY_GENERATION__TEMPERATURE", "0.2");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("CHATRELAY_GENERATION__TEMPERATURE");
        assert_eq!(config.generation.temperature, 0.2);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = env_guard();
        let file = write_temp_json(r#"{ "provider": { "model": "file-model" } }"#);
        std::env::set_var("CHATRELAY_PROVIDER__MODEL", "env-model");
        let config = load_config_from_path(file.path());
        std::env::remove_var("CHATRELAY_PROVIDER__MODEL");
        assert_eq!(config.provider.model, "env-model");
    }
}
