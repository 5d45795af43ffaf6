//! Chatrelay CLI — entry point.
//!
//! # Commands
//!
//! - `chatrelay serve [--config PATH] [--host HOST] [--port PORT]` — run the server
//! - `chatrelay status [--config PATH]` — show the resolved configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;

use chatrelay_core::config::load_config;
use chatrelay_server::{build_router, build_state};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Chatrelay — a minimal HTTP → LLM chat relay
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Config file path (default: ./chatrelay.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show the resolved configuration and provider status
    Status {
        /// Config file path (default: ./chatrelay.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            logs,
        } => {
            init_logging(logs);
            serve(config, host, port).await
        }
        Commands::Status { config } => {
            init_logging(false);
            status(config)
        }
    }
}

// ─────────────────────────────────────────────
// Serve command
// ─────────────────────────────────────────────

async fn serve(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    // .env first, so env overrides see it
    dotenv().ok();

    let mut config = load_config(config_path.as_deref());
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    // The provider must construct before the listener binds: a missing
    // credential fails the process before any connection is accepted.
    let state = build_state(&config).context("failed to construct provider")?;
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        provider = %config.provider.provider,
        model = %config.provider.model,
        "chatrelay listening"
    );

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

// ─────────────────────────────────────────────
// Status command
// ─────────────────────────────────────────────

fn status(config_path: Option<PathBuf>) -> Result<()> {
    dotenv().ok();
    let config = load_config(config_path.as_deref());

    println!("Chatrelay configuration");
    println!();
    println!("  Provider:   {}", config.provider.provider);
    println!("  Model:      {}", config.provider.model);
    println!("  API key:    {}", mask_secret(&config.provider.api_key));
    println!(
        "  API base:   {}",
        config.provider.api_base.as_deref().unwrap_or("(default)")
    );
    println!(
        "  Listen:     {}:{}",
        config.server.host, config.server.port
    );
    println!("  Static dir: {}", config.server.static_dir);
    println!(
        "  Defaults:   temperature={}, max_tokens={}",
        config.generation.temperature,
        config
            .generation
            .max_tokens
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(remote default)".to_string())
    );

    Ok(())
}

/// Mask a secret for display. Short secrets would be echoed whole by a
/// prefix, so anything of six characters or fewer is hidden entirely.
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    if secret.chars().count() <= 6 {
        return "(set)".to_string();
    }
    let visible: String = secret.chars().take(6).collect();
    format!("{visible}…")
}

// ─────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("chatrelay=debug,info")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("sk-abcdef123456"), "sk-abc…");
    }

    #[test]
    fn test_mask_secret_short_values_fully_hidden() {
        // A prefix of a short secret would reveal all of it
        assert_eq!(mask_secret("abc"), "(set)");
        assert_eq!(mask_secret("abcdef"), "(set)");
        assert_eq!(mask_secret("abcdefg"), "abcdef…");
    }
}
