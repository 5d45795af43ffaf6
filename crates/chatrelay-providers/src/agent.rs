//! Agent-runner provider — a named agent bound to a system instruction and a
//! wrapped model reference, with per-call sessions.
//!
//! Each `generate` call mints a fresh session identifier, registers it with
//! the session service, runs the agent, and scans the resulting events for
//! the first one flagged final with non-empty content. A session identifier
//! is never reused across calls, so unrelated exchanges cannot alias into
//! the same remote session; the record is removed when the call completes,
//! so the registry never outgrows the set of in-flight calls.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use chatrelay_core::config::ProviderSettings;
use chatrelay_core::error::ProviderError;
use chatrelay_core::types::Message;

use crate::direct::DirectProvider;
use crate::session::InMemorySessionService;
use crate::traits::{ChatProvider, GenerationParams};

/// Returned when the event sequence contains no final event with content.
/// A deliberate soft failure, not an error.
pub const NO_RESPONSE_SENTINEL: &str = "[No response]";

/// Instruction used when the system prompt file is absent or unreadable.
const DEFAULT_INSTRUCTION: &str = "You are a helpful assistant.";

/// Application name under which sessions are registered.
const APP_NAME: &str = "chatrelay";

/// All requests run as the same logical user; isolation comes from the
/// per-call session identifier.
const USER_ID: &str = "user1";

// ─────────────────────────────────────────────
// Agent definition & events
// ─────────────────────────────────────────────

/// Static description of the agent: name, instruction, target model.
#[derive(Clone, Debug)]
pub struct AgentDefinition {
    pub name: String,
    pub instruction: String,
    pub model: String,
}

/// One event produced by an agent run.
///
/// The event flagged `is_final` carries the completed answer, as opposed to
/// intermediate or truncated output.
#[derive(Clone, Debug)]
pub struct AgentEvent {
    pub author: String,
    pub content: Option<String>,
    pub is_final: bool,
}

// ─────────────────────────────────────────────
// AgentProvider
// ─────────────────────────────────────────────

/// Provider that routes each message through an agent run with session
/// bookkeeping. Holds only immutable configuration plus the concurrent
/// session registry; nothing per-call is stored on the instance.
#[derive(Debug)]
pub struct AgentProvider {
    agent: AgentDefinition,
    /// Wrapped model reference — the same OpenAI-compatible call path as the
    /// direct adapter.
    model: DirectProvider,
    sessions: InMemorySessionService,
}

impl AgentProvider {
    /// Build the agent from settings: load the system instruction (with
    /// fallback), wrap the model client, create the session service.
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let instruction = load_system_prompt(Path::new(&settings.system_prompt_path));
        let model = DirectProvider::new(settings)?;

        let agent = AgentDefinition {
            name: "chat_agent".to_string(),
            instruction,
            model: settings.model.clone(),
        };

        info!(model = %agent.model, "agent configured");

        Ok(AgentProvider {
            agent,
            model,
            sessions: InMemorySessionService::new(),
        })
    }

    /// Run the agent for one registered session and return its events.
    ///
    /// The session must have been created first; upstream overload
    /// propagates distinctly rather than being re-wrapped.
    async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
        params: &GenerationParams,
    ) -> Result<Vec<AgentEvent>, ProviderError> {
        if self.sessions.get(APP_NAME, user_id, session_id).is_none() {
            return Err(ProviderError::Configuration(format!(
                "unknown session: {session_id}"
            )));
        }

        let messages = vec![
            Message::system(&self.agent.instruction),
            Message::user(message),
        ];

        let response = self.model.complete(&messages, params).await?;

        let events = response
            .choices
            .into_iter()
            .map(|choice| AgentEvent {
                author: self.agent.name.clone(),
                content: choice.message.content,
                is_final: choice.finish_reason.as_deref() == Some("stop"),
            })
            .collect();

        Ok(events)
    }

    /// Number of sessions currently registered (one per in-flight call).
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl ChatProvider for AgentProvider {
    async fn generate(
        &self,
        message: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        // Fresh identifier per logical exchange, never reused.
        let session_id = Uuid::new_v4().to_string();
        self.sessions.create_session(APP_NAME, USER_ID, &session_id);

        debug!(session = %session_id, "running agent");

        let result = self.run(USER_ID, &session_id, message, params).await;

        // The session lives no longer than the call, error or not.
        self.sessions.remove_session(APP_NAME, USER_ID, &session_id);

        let events = result?;

        for event in &events {
            if event.is_final {
                if let Some(text) = event.content.as_deref() {
                    if !text.is_empty() {
                        return Ok(text.to_string());
                    }
                }
            }
        }

        debug!(session = %session_id, events = events.len(), "no final event with content");
        Ok(NO_RESPONSE_SENTINEL.to_string())
    }

    fn tag(&self) -> &str {
        "agent"
    }

    fn model(&self) -> &str {
        &self.agent.model
    }
}

// ─────────────────────────────────────────────
// System prompt loading
// ─────────────────────────────────────────────

/// Load the system instruction from a file, falling back to the built-in
/// default when the file is absent or unreadable.
fn load_system_prompt(path: &Path) -> String {
    if !path.exists() {
        warn!(
            "System prompt file not found at {}, using default",
            path.display()
        );
        return DEFAULT_INSTRUCTION.to_string();
    }

    match std::fs::read_to_string(path) {
        Ok(prompt) => {
            info!("Loaded system prompt from {}", path.display());
            prompt.trim().to_string()
        }
        Err(e) => {
            warn!("Failed to load system prompt: {}", e);
            DEFAULT_INSTRUCTION.to_string()
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
