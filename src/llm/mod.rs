//! LLM — adapter for the external text-generation capability.
//!
//! DESIGN
//! ======
//! `LlmClient` is built once at startup from an explicit [`LlmConfig`] and
//! handed to the post writer as `Arc<dyn TextGenerator>`. There is no
//! process-wide client; tests substitute a fake generator.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::TextGenerator;
use types::{GenerateRequest, GenerateResponse, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete generation client backed by the Gemini API.
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = gemini::GeminiClient::new(config.api_key, config.api_key_var, config.base_url, config.timeouts)?;
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-3-flash-preview"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.inner.generate(request).await
    }
}
