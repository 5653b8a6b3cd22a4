//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTML page at `/` is the primary surface: a plain form that posts
//! back to the server and a preview bubble rendered from composer state.
//! The JSON API under `/api` drives the same composer for scripted use.

pub mod api;
pub mod page;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/generate", post(page::generate))
        .route("/reset", post(page::reset))
        .route("/api/state", get(api::get_state))
        .route("/api/params", patch(api::patch_params))
        .route("/api/generate", post(api::generate))
        .route("/api/cancel", post(api::cancel))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
