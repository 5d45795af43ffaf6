//! In-memory session registry for the agent runner.
//!
//! Sessions group a single exchange: the agent provider mints a fresh
//! identifier per call, registers it here, removes it when the call
//! completes, and never reuses it. The registry is safe for concurrent use
//! by multiple simultaneous calls.
//!
//! No disk persistence — a session lives no longer than the call that
//! created it.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────
// Session record
// ─────────────────────────────────────────────

/// A registered session: one logical exchange between a user and the agent.
#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────
// InMemorySessionService
// ─────────────────────────────────────────────

/// Thread-safe session registry — multiple readers, exclusive writer.
#[derive(Debug, Default)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionService {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(app_name: &str, user_id: &str, session_id: &str) -> String {
        format!("{app_name}:{user_id}:{session_id}")
    }

    /// Register a new session.
    pub fn create_session(&self, app_name: &str, user_id: &str, session_id: &str) {
        let record = SessionRecord {
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(Self::key(app_name, user_id, session_id), record);
    }

    /// Look up a registered session.
    pub fn get(&self, app_name: &str, user_id: &str, session_id: &str) -> Option<SessionRecord> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(&Self::key(app_name, user_id, session_id)).cloned()
    }

    /// Remove a session once its exchange is complete.
    pub fn remove_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Option<SessionRecord> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(&Self::key(app_name, user_id, session_id))
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_create_and_get() {
        let service = InMemorySessionService::new();
        service.create_session("relay", "user1", "sess-abc");

        let record = service.get("relay", "user1", "sess-abc").unwrap();
        assert_eq!(record.app_name, "relay");
        assert_eq!(record.user_id, "user1");
        assert_eq!(record.session_id, "sess-abc");
    }

    #[test]
    fn test_get_unknown_session() {
        let service = InMemorySessionService::new();
        assert!(service.get("relay", "user1", "nope").is_none());
    }

    #[test]
    fn test_remove_session() {
        let service = InMemorySessionService::new();
        service.create_session("relay", "user1", "sess-abc");

        let removed = service.remove_session("relay", "user1", "sess-abc").unwrap();
        assert_eq!(removed.session_id, "sess-abc");
        assert!(service.is_empty());

        // Removing again is a no-op
        assert!(service.remove_session("relay", "user1", "sess-abc").is_none());
    }

    #[test]
    fn test_distinct_sessions_do_not_alias() {
        let service = InMemorySessionService::new();
        service.create_session("relay", "user1", "sess-1");
        service.create_session("relay", "user1", "sess-2");

        assert_eq!(service.len(), 2);
        assert!(service.get("relay", "user1", "sess-1").is_some());
        assert!(service.get("relay", "user1", "sess-2").is_some());
    }

    #[test]
    fn test_concurrent_registration() {
        let service = Arc::new(InMemorySessionService::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let service = service.clone();
            handles.push(std::thread::spawn(move || {
                service.create_session("relay", "user1", &format!("sess-{i}"));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.len(), 16);
    }
}
