//! Request normalization
//!
//! Resolves the target model, decides between schema-constrained decoding and
//! prompt-level JSON instructions, and derives the message list sent upstream.

use once_cell::sync::Lazy;
use regex::Regex;

use super::schema::{quote_shape_text, required_quote_fields};
use super::types::{GenerationRequest, Message};
use crate::error::{AppError, AppResult};

/// Model ids become a URL path segment and a metrics label
static MODEL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,128}$").unwrap());

/// How the upstream model is asked for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingMode {
    /// Provider enforces the quote schema itself
    SchemaConstrained,
    /// Shape is described in the prompt and the reply is recovered from text
    TextInstructions,
}

/// Per-instance model routing rules
#[derive(Debug, Clone)]
pub struct ModelPolicy {
    /// Whether the provider offers schema-constrained decoding at all
    pub supports_schema: bool,
    /// Model used when the request names none
    pub default_model: String,
    /// Model families whose schema mode is unreliable
    pub text_only_prefixes: Vec<String>,
}

impl ModelPolicy {
    /// Requested model, or the default when absent or blank
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str())
            .to_string()
    }

    /// Classify a model id
    pub fn mode_for(&self, model: &str) -> DecodingMode {
        let text_only = !self.supports_schema
            || self
                .text_only_prefixes
                .iter()
                .any(|prefix| model.starts_with(prefix.as_str()));

        if text_only {
            DecodingMode::TextInstructions
        } else {
            DecodingMode::SchemaConstrained
        }
    }
}

/// Request ready for the upstream invoker
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub model: String,
    pub mode: DecodingMode,
    pub messages: Vec<Message>,
}

/// Instruction block appended to the last message for text-only models
pub fn json_instructions() -> String {
    format!(
        "\n\nIMPORTANT: Return ONLY a valid JSON object with these exact fields:\n{shape}\n\
         Required fields: {required}\n\
         CRITICAL RULES:\n\
         1. Extract booth_specs from the document content - dimensions, square footage, location, event name.\n\
         2. EVERY category with a non-zero dollar amount MUST have line_items showing what makes up that number.\n\
         3. For walls: itemize each wall section (e.g., \"Back Wall Outside - Painted MDF\", qty, dimensions, $/sqft, extended).\n\
         4. For services: show percentage basis and calculation (e.g., \"Design/PM @ 7.2% of $52,604\").\n\
         5. For I&D: show crew count, hours/days, and implied rate if calculable.\n\
         6. Use whole numbers for dollar amounts. No markdown, no code fences, no explanation, just the JSON.",
        shape = quote_shape_text(),
        required = required_quote_fields().join(", "),
    )
}

/// Derive the upstream request from a caller request
pub fn normalize(request: &GenerationRequest, policy: &ModelPolicy) -> AppResult<NormalizedRequest> {
    let Some(last_index) = request.messages.len().checked_sub(1) else {
        return Err(AppError::EmptyConversation);
    };

    let model = policy.resolve_model(request.model.as_deref());
    if !MODEL_ID_PATTERN.is_match(&model) {
        return Err(AppError::InvalidRequest(
            "model id may only contain letters, digits, '.', '_' and '-'".to_string(),
        ));
    }
    let mode = policy.mode_for(&model);

    let mut messages = request.messages.clone();
    if mode == DecodingMode::TextInstructions {
        messages[last_index].content.push_str(&json_instructions());
    }

    Ok(NormalizedRequest {
        model,
        mode,
        messages,
    })
}
