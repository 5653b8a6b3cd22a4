//! Session service — drives the composer through one generation.
//!
//! DESIGN
//! ======
//! `submit` takes a ticket under the composer lock, spawns the generation
//! as a Tokio task, and attaches the task's abort handle before releasing
//! the lock. The task cannot settle before it is attached. `cancel` aborts
//! the task; a result that still arrives is dropped by the ticket check.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::composer::SubmitSkipped;
use crate::state::{AppState, lock_composer};

/// Start a generation for the current params.
///
/// # Errors
///
/// [`SubmitSkipped`] when the topic is blank or a request is already pending.
pub fn submit(state: &AppState) -> Result<JoinHandle<()>, SubmitSkipped> {
    let mut composer = state.composer();
    let ticket = composer.begin()?;
    let seq = ticket.seq;
    info!(seq, "session: submission started");

    let writer = Arc::clone(&state.writer);
    let slot = Arc::clone(&state.composer);
    let handle = tokio::spawn(async move {
        let result = writer.write(&ticket.params).await;
        let ok = result.is_ok();
        let applied = lock_composer(&slot).settle(ticket.seq, result);
        if applied {
            info!(seq = ticket.seq, ok, "session: submission settled");
        } else {
            debug!(seq = ticket.seq, "session: late result dropped");
        }
    });
    composer.attach(seq, handle.abort_handle());
    Ok(handle)
}

/// Submit and wait for the outcome.
///
/// # Errors
///
/// [`SubmitSkipped`] when the submission was not started.
pub async fn submit_and_wait(state: &AppState) -> Result<(), SubmitSkipped> {
    let handle = submit(state)?;
    if let Err(e) = handle.await {
        debug!(cancelled = e.is_cancelled(), "session: generation task did not finish");
    }
    Ok(())
}

/// Abort the in-flight generation. Returns `true` if one was pending.
pub fn cancel(state: &AppState) -> bool {
    let cancelled = state.composer().cancel();
    if cancelled {
        info!("session: in-flight generation cancelled");
    }
    cancelled
}

/// Cancel and clear output; the view starts over with the same params.
pub fn reset(state: &AppState) {
    state.composer().reset();
    info!("session: reset");
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
