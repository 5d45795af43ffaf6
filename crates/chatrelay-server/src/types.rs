//! Request/response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
///
/// Constructed fresh per request and discarded after use. Absent parameters
/// fall back to the configured generation defaults.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// Successful reply from `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Liveness payload for `GET /health`. No upstream check is performed.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_full_body() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "hi", "temperature": 0.2, "max_tokens": 100}"#,
        )
        .unwrap();
        assert_eq!(req.message, "hi");
        assert_eq!(req.temperature, Some(0.2));
        assert_eq!(req.max_tokens, Some(100));
    }

    #[test]
    fn test_chat_request_message_only() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.temperature.is_none());
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn test_chat_request_requires_message() {
        let result = serde_json::from_str::<ChatRequest>(r#"{"temperature": 0.2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_health_response_shape() {
        let payload = HealthResponse {
            status: "healthy",
            ai_provider: "direct".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["ai_provider"], "direct");
    }
}
