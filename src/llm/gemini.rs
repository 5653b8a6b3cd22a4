//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper for `POST {base}/models/{model}:generateContent`.
//! Request building and response parsing are pure functions for testability.

use super::config::LlmTimeouts;
use super::types::{GenerateRequest, GenerateResponse, LlmError};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_key_var: String,
    base_url: String,
}

impl GeminiClient {
    /// Build the client. A missing key is accepted here and reported on
    /// every call instead.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if reqwest cannot build a client.
    pub fn new(
        api_key: Option<String>,
        api_key_var: String,
        base_url: String,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, api_key_var, base_url })
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingApiKey { var: self.api_key_var.clone() })?;

        let url = endpoint(&self.base_url, &request.model);
        let body = build_body(request);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

fn endpoint(base_url: &str, model: &str) -> String {
    format!("{base_url}/models/{model}:generateContent")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    system_instruction: ApiContent<'a>,
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(serde::Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    /// Thought summaries are returned as parts flagged `thought: true`.
    #[serde(default)]
    thought: bool,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// BUILDING / PARSING
// =============================================================================

fn build_body(request: &GenerateRequest) -> ApiRequest<'_> {
    ApiRequest {
        system_instruction: ApiContent { role: None, parts: vec![ApiPart { text: &request.system }] },
        contents: vec![ApiContent { role: Some("user"), parts: vec![ApiPart { text: &request.prompt }] }],
        generation_config: GenerationConfig { temperature: request.temperature },
    }
}

fn parse_response(json: &str) -> Result<GenerateResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let (input_tokens, output_tokens) = api
        .usage_metadata
        .map_or((0, 0), |u| (u.prompt_token_count, u.candidates_token_count));

    let Some(candidate) = api.candidates.into_iter().next() else {
        return Ok(GenerateResponse { text: String::new(), finish_reason: None, input_tokens, output_tokens });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    Ok(GenerateResponse { text, finish_reason: candidate.finish_reason, input_tokens, output_tokens })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
