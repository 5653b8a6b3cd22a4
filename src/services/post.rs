//! Post service — form parameters → prompt → one generation call.
//!
//! DESIGN
//! ======
//! `PostWriter` owns the injected generation capability and the model id.
//! Each `write` issues exactly one request, trims the returned text, and
//! folds every failure into `PostError`. The cause is logged here; callers
//! only decide how to present it.

use std::fmt::{self, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::TextGenerator;
use crate::llm::types::{GenerateRequest, LlmError};

/// Sampling temperature. Favors variation over determinism.
pub const TEMPERATURE: f32 = 0.75;

/// CTA requested when the form leaves the field blank.
pub const DEFAULT_CTA: &str = "Make sure to check it out";

pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert content growth strategist for top Indian Telegram channels. You understand the pulse of the Indian audience, whether the channel covers loot deals, stock market tips, crypto updates, breaking news or EdTech.

Goal: write viral, high-engagement posts that feel native to Indian Telegram communities.

Formatting rules:
- Bold (`**text**`): headlines, prices and key terms (e.g. **Rs. 499 only**, **BREAKING**, **Nifty 50**).
- Monospace (`` `text` ``): only for coupon codes, links or exact data points (e.g. `Code: OFF50`).
- Italics (`__text__`): subtle emphasis or side notes.
- Emojis: use them freely; Indian audiences respond to expressive emojis (🔥, 🚀, 😱, 🇮🇳, ✅, 💰).
- Structure:
  1. Headline: grab attention immediately (caps or bold).
  2. Body: short bullet points or paragraphs that are easy to scan.
  3. Call to action: strong and directive.

Language and tone:
- Hinglish: the most popular style. Mix English with everyday Hindi words naturally (e.g. "Ye offer miss mat karna!", "Abhi check karo").
- Hindi: clean, conversational Hindi in Devanagari script.
- English: simple, direct Indian English phrasing.
- Urgency: words like "Loot", "Fast", "Jaldi", "Limited Time", "Mahaloot".

Output:
- Return ONLY the raw message text.
- No preamble such as "Here is your post" and no markdown code fences."#;

// =============================================================================
// PARAMETERS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Urgent,
    #[default]
    Hype,
    Trust,
    Professional,
    Casual,
    Educational,
}

impl Tone {
    pub const ALL: [Tone; 6] =
        [Tone::Urgent, Tone::Hype, Tone::Trust, Tone::Professional, Tone::Casual, Tone::Educational];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Hype => "Hype",
            Self::Trust => "Trust",
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Educational => "Educational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hinglish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Hinglish];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Hinglish => "Hinglish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form parameters for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostParams {
    pub topic: String,
    pub tone: Tone,
    pub language: Language,
    pub cta: String,
}

impl PostParams {
    /// Whether the topic passes the only validation rule: not blank.
    #[must_use]
    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }

    /// The CTA to request, falling back to [`DEFAULT_CTA`].
    #[must_use]
    pub fn effective_cta(&self) -> &str {
        let cta = self.cta.trim();
        if cta.is_empty() { DEFAULT_CTA } else { cta }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// The provider answered but produced no text.
    #[error("no content generated")]
    Empty,
    /// Transport, auth, quota or provider-side failure.
    #[error("generation failed: {0}")]
    Failed(#[from] LlmError),
}

// =============================================================================
// PROMPT
// =============================================================================

#[must_use]
pub fn build_prompt(params: &PostParams) -> String {
    let mut prompt = String::from("Create a Telegram post for an Indian audience.\n\nParameters:\n");
    let _ = writeln!(prompt, "- Topic: {}", params.topic.trim());
    let _ = writeln!(prompt, "- Tone: {}", params.tone);
    let _ = writeln!(prompt, "- Language: {}", params.language);
    let _ = writeln!(prompt, "- CTA: {}", params.effective_cta());
    prompt.push_str(
        "\nContext: The audience is primarily Indian. Use appropriate cultural references, \
         currency (₹), and slang if the tone allows.\n",
    );
    prompt
}

// =============================================================================
// WRITER
// =============================================================================

/// The generation client: one call per post.
pub struct PostWriter {
    llm: Arc<dyn TextGenerator>,
    model: String,
}

impl PostWriter {
    #[must_use]
    pub fn new(llm: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self { llm, model: model.into() }
    }

    /// Build the request for `params` without sending it.
    #[must_use]
    pub fn request_for(&self, params: &PostParams) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(params),
            temperature: TEMPERATURE,
        }
    }

    /// Generate a post for `params`.
    ///
    /// # Errors
    ///
    /// [`PostError::Empty`] when the provider returns blank text,
    /// [`PostError::Failed`] for any transport or provider failure.
    pub async fn write(&self, params: &PostParams) -> Result<String, PostError> {
        let request = self.request_for(params);
        info!(
            model = %self.model,
            tone = %params.tone,
            language = %params.language,
            topic_len = params.topic.len(),
            "post: generating"
        );

        let response = match self.llm.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "post: generation failed");
                return Err(PostError::Failed(e));
            }
        };

        let text = response.text.trim();
        if text.is_empty() {
            warn!(finish_reason = ?response.finish_reason, "post: provider returned no text");
            return Err(PostError::Empty);
        }

        info!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            chars = text.chars().count(),
            "post: generated"
        );
        Ok(text.to_string())
    }
}

#[cfg(test)]
#[path = "post_test.rs"]
mod tests;
