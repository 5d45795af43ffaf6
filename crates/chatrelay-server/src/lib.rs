//! HTTP front door for Chatrelay.
//!
//! Exposes three routes: a static root page, `POST /chat` (the relay), and
//! `GET /health`. All provider failures cross exactly one translation
//! boundary ([`error::ApiError`]) on their way to the wire.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::{build_router, build_state, AppState};
