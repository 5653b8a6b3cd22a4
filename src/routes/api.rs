//! JSON API over the composer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::debug;

use crate::preview::format::format_html;
use crate::services::composer::{ParamsPatch, Phase, SubmitSkipped};
use crate::services::post::PostParams;
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StateSnapshot {
    pub phase: Phase,
    /// Sequence number of the latest submission.
    pub seq: u64,
    pub params: PostParams,
    pub loading: bool,
    pub error: Option<String>,
    /// Raw source text with markers intact.
    pub content: String,
    /// `content` rendered for display.
    pub html: String,
    pub can_submit: bool,
}

impl StateSnapshot {
    #[must_use]
    pub fn capture(state: &AppState) -> Self {
        let composer = state.composer();
        Self {
            phase: composer.phase(),
            seq: composer.seq(),
            params: composer.params().clone(),
            loading: composer.is_loading(),
            error: composer.error().map(str::to_string),
            content: composer.content().to_string(),
            html: format_html(composer.content()),
            can_submit: composer.can_submit(),
        }
    }
}

pub(crate) fn skipped_to_status(skipped: SubmitSkipped) -> StatusCode {
    match skipped {
        SubmitSkipped::EmptyTopic => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitSkipped::InFlight => StatusCode::CONFLICT,
    }
}

/// `GET /api/state` — current composer snapshot.
pub async fn get_state(State(state): State<AppState>) -> Json<StateSnapshot> {
    Json(StateSnapshot::capture(&state))
}

/// `PATCH /api/params` — edit form fields. Allowed while pending.
pub async fn patch_params(State(state): State<AppState>, Json(patch): Json<ParamsPatch>) -> Json<StateSnapshot> {
    state.composer().apply(patch);
    Json(StateSnapshot::capture(&state))
}

/// `POST /api/generate` — apply the given fields, if any, generate, and
/// return the settled snapshot. Without a body the stored params are used.
pub async fn generate(
    State(state): State<AppState>,
    body: Option<Json<ParamsPatch>>,
) -> Result<Json<StateSnapshot>, StatusCode> {
    if let Some(Json(patch)) = body {
        state.composer().apply(patch);
    }
    if let Err(skipped) = session::submit_and_wait(&state).await {
        debug!(reason = %skipped, "api: generate skipped");
        return Err(skipped_to_status(skipped));
    }
    Ok(Json(StateSnapshot::capture(&state)))
}

/// `POST /api/cancel` — abort the in-flight request.
pub async fn cancel(State(state): State<AppState>) -> Json<StateSnapshot> {
    session::cancel(&state);
    Json(StateSnapshot::capture(&state))
}
