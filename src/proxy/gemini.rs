//! Google Gemini dialect
//!
//! `generateContent` API. Key differences from chat-style APIs:
//! - `contents` with `parts`, and the role `model` for assistant turns.
//! - System prompt goes in `systemInstruction`.
//! - `generationConfig` carries temperature, `maxOutputTokens`, and for
//!   schema-capable models `responseMimeType` plus `responseSchema`.
//! - Reply text is `candidates[0].content.parts[0].text`.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::headers::build_credential_headers;
use super::provider::{ProviderDialect, TokenUsage, UpstreamReply, UpstreamRequest};
use crate::error::{AppError, AppResult};
use crate::quote::schema::quote_json_schema;
use crate::quote::DecodingMode;

/// Model family that accepts `thinkingConfig.thinkingLevel`
const THINKING_LEVEL_PREFIX: &str = "gemini-3";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    temperature: f64,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini `generateContent` dialect
#[derive(Debug, Clone, Default)]
pub struct GeminiDialect;

impl GeminiDialect {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderDialect for GeminiDialect {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn supports_schema_decoding(&self) -> bool {
        true
    }

    fn model_role(&self) -> &'static str {
        "model"
    }

    fn endpoint(&self, base_url: &str, model: &str) -> String {
        format!("{}/models/{}:generateContent", base_url, model)
    }

    fn headers(&self, api_key: &str) -> AppResult<HeaderMap> {
        build_credential_headers("x-goog-api-key", api_key)
    }

    fn build_body(&self, request: &UpstreamRequest<'_>) -> AppResult<Value> {
        let schema_mode = request.mode == DecodingMode::SchemaConstrained;

        let body = GenerateContentRequest {
            contents: request
                .messages
                .iter()
                .map(|msg| Content {
                    role: self.wire_role(msg.role),
                    parts: vec![Part { text: &msg.content }],
                })
                .collect(),
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: schema_mode.then_some("application/json"),
                response_schema: schema_mode.then(quote_json_schema),
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                thinking_config: (!schema_mode && request.model.starts_with(THINKING_LEVEL_PREFIX))
                    .then_some(ThinkingConfig {
                        thinking_level: "LOW",
                    }),
            },
        };

        serde_json::to_value(&body)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize Gemini request: {}", e)))
    }

    fn parse_reply(&self, body: Value) -> AppResult<UpstreamReply> {
        let response: GenerateContentResponse = serde_json::from_value(body).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Unexpected Gemini response shape: {}", e))
        })?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        let tokens = response.usage_metadata.as_ref().map(|usage| TokenUsage {
            input_tokens: usage["promptTokenCount"].as_u64().unwrap_or(0),
            output_tokens: usage["candidatesTokenCount"].as_u64().unwrap_or(0),
        });

        Ok(UpstreamReply {
            text,
            usage: response.usage_metadata,
            tokens,
        })
    }
}
