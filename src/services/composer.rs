//! Composer — form/preview controller state.
//!
//! DESIGN
//! ======
//! Three phases derived from the fields: Idle, Pending (loading), Settled
//! (content xor error). Every submission takes a ticket from a monotonic
//! sequence; `settle` only applies a result whose ticket is still current,
//! so a cancelled or superseded request can never overwrite newer state.
//!
//! The composer is plain data behind a mutex in `AppState`. The async side
//! (spawning, aborting) lives in `services::session`.

use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;
use tracing::debug;

use super::post::{Language, PostError, PostParams, Tone};

/// The only error text users ever see. Empty results and hard failures are
/// not distinguished.
pub const GENERIC_ERROR: &str = "Failed to generate post. Please check your API key or try again.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Pending,
    Settled,
}

/// Why a submission was not started. Neither case changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitSkipped {
    #[error("topic is empty")]
    EmptyTopic,
    #[error("a generation request is already in flight")]
    InFlight,
}

/// Handed out by [`Composer::begin`]; carries the params snapshot to send.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub seq: u64,
    pub params: PostParams,
}

/// Partial field edit. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamsPatch {
    pub topic: Option<String>,
    pub tone: Option<Tone>,
    pub language: Option<Language>,
    pub cta: Option<String>,
}

// =============================================================================
// COMPOSER
// =============================================================================

#[derive(Debug, Default)]
pub struct Composer {
    params: PostParams,
    loading: bool,
    error: Option<String>,
    content: String,
    seq: u64,
    inflight: Option<AbortHandle>,
}

impl Composer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn params(&self) -> &PostParams {
        &self.params
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Pending
        } else if !self.content.is_empty() || self.error.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        }
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.loading && self.params.has_topic()
    }

    // -------------------------------------------------------------------------
    // Field edits: allowed in every phase, never touch loading/error/content.
    // -------------------------------------------------------------------------

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.params.topic = topic.into();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.params.tone = tone;
    }

    pub fn set_language(&mut self, language: Language) {
        self.params.language = language;
    }

    pub fn set_cta(&mut self, cta: impl Into<String>) {
        self.params.cta = cta.into();
    }

    pub fn apply(&mut self, patch: ParamsPatch) {
        if let Some(topic) = patch.topic {
            self.set_topic(topic);
        }
        if let Some(tone) = patch.tone {
            self.set_tone(tone);
        }
        if let Some(language) = patch.language {
            self.set_language(language);
        }
        if let Some(cta) = patch.cta {
            self.set_cta(cta);
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Idle/Settled → Pending. Clears error and content synchronously.
    ///
    /// # Errors
    ///
    /// [`SubmitSkipped`] when the topic is blank or a request is pending.
    pub fn begin(&mut self) -> Result<Ticket, SubmitSkipped> {
        if !self.params.has_topic() {
            return Err(SubmitSkipped::EmptyTopic);
        }
        if self.loading {
            return Err(SubmitSkipped::InFlight);
        }
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.content.clear();
        Ok(Ticket { seq: self.seq, params: self.params.clone() })
    }

    /// Remember the task serving ticket `seq` so it can be aborted.
    pub fn attach(&mut self, seq: u64, handle: AbortHandle) {
        if seq == self.seq && self.loading {
            self.inflight = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Pending → Settled. Returns `false` when the result was stale and dropped.
    pub fn settle(&mut self, seq: u64, result: Result<String, PostError>) -> bool {
        if seq != self.seq || !self.loading {
            debug!(seq, current = self.seq, "composer: discarding stale result");
            return false;
        }
        self.loading = false;
        self.inflight = None;
        match result {
            Ok(text) => {
                self.error = None;
                self.content = text;
            }
            Err(_) => {
                self.content.clear();
                self.error = Some(GENERIC_ERROR.to_string());
            }
        }
        true
    }

    /// Abort the in-flight request, if any. Its result will be discarded.
    /// Returns `true` if a request was pending.
    pub fn cancel(&mut self) -> bool {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
        if !self.loading {
            return false;
        }
        self.seq += 1;
        self.loading = false;
        true
    }

    /// Cancel and clear any settled output, returning to Idle. Params stay.
    pub fn reset(&mut self) {
        self.cancel();
        self.error = None;
        self.content.clear();
    }
}

#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;
