//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the post writer (with its injected generation client) and the
//! single composer for this page session. The composer sits behind a std
//! mutex that is never held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::services::composer::Composer;
use crate::services::post::PostWriter;

/// Shared application state. Clone is required by Axum; every field is
/// Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub writer: Arc<PostWriter>,
    pub composer: Arc<Mutex<Composer>>,
}

impl AppState {
    #[must_use]
    pub fn new(writer: PostWriter) -> Self {
        Self {
            writer: Arc::new(writer),
            composer: Arc::new(Mutex::new(Composer::new())),
        }
    }

    /// Lock the composer. A poisoned lock still yields the data.
    pub fn composer(&self) -> MutexGuard<'_, Composer> {
        lock_composer(&self.composer)
    }
}

pub(crate) fn lock_composer(composer: &Mutex<Composer>) -> MutexGuard<'_, Composer> {
    composer.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// TEST HELPERS
// =============================================================================
