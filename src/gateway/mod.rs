//! Axum HTTP gateway in front of the tweet generation pipeline.
//!
//! Routes:
//! - `POST /generate-tweet`: validate the body, run the pipeline, return `{ tweet }`
//! - `GET  /tweets?userId=`: a user's history, newest first
//! - `GET  /health`: liveness plus the active store backend
//!
//! Every route sits behind a 64KB body limit and a request timeout.

mod handlers;
mod server;

pub use server::{build_app, build_state, run_gateway, run_gateway_with_listener};

use crate::config::StoreBackend;
use crate::generation::TweetGenerator;
use crate::store::HistoryStore;
use std::sync::Arc;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<TweetGenerator>,
    pub history: Arc<dyn HistoryStore>,
    pub store_backend: StoreBackend,
}

/// `GET /tweets` query params
#[derive(Debug, Default, serde::Deserialize)]
pub struct TweetsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}
