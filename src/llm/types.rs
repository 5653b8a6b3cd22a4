//! LLM types — provider-neutral request/response types and errors.
//!
//! The generation capability is modelled as a single async call: one
//! request in, one block of text out. Anything richer (streaming, tools,
//! multi-turn history) is outside what the post writer needs.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Grepable code attached to log lines.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// A single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Provider model identifier (e.g. `"gemini-3-flash-preview"`).
    pub model: String,
    /// System-level instruction that frames every generation.
    pub system: String,
    /// The user prompt.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Response from a generation call.
///
/// `text` is empty when the provider returned no usable candidate.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    pub text: String,
    pub finish_reason: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// TEXT GENERATOR TRAIT
// =============================================================================

/// Provider-neutral async trait for text generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one generation request to the provider and await the response.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or the API key is absent.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
