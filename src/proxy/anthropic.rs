//! Anthropic dialect
//!
//! Messages API. The system prompt is a top-level `system` string, roles are
//! already `user`/`assistant`, and the reply text lives in the first `text`
//! content block. There is no schema-constrained decoding, so every model on
//! this dialect receives prompt-level JSON instructions.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::headers::build_credential_headers;
use super::provider::{ProviderDialect, TokenUsage, UpstreamReply, UpstreamRequest};
use crate::error::{AppError, AppResult};

/// Pinned Messages API version
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API dialect
#[derive(Debug, Clone, Default)]
pub struct AnthropicDialect;

impl AnthropicDialect {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderDialect for AnthropicDialect {
    fn name(&self) -> &'static str {
        "Claude"
    }

    fn supports_schema_decoding(&self) -> bool {
        false
    }

    fn model_role(&self) -> &'static str {
        "assistant"
    }

    fn endpoint(&self, base_url: &str, _model: &str) -> String {
        format!("{}/messages", base_url)
    }

    fn headers(&self, api_key: &str) -> AppResult<HeaderMap> {
        let mut headers = build_credential_headers("x-api-key", api_key)?;
        headers.insert(
            HeaderName::from_static("anthropic-version"),
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    fn build_body(&self, request: &UpstreamRequest<'_>) -> AppResult<Value> {
        let body = MessagesRequest {
            model: request.model,
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
            system: request.system_instruction,
            messages: request
                .messages
                .iter()
                .map(|msg| WireMessage {
                    role: self.wire_role(msg.role),
                    content: &msg.content,
                })
                .collect(),
        };

        serde_json::to_value(&body).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize Claude request: {}", e))
        })
    }

    fn parse_reply(&self, body: Value) -> AppResult<UpstreamReply> {
        let response: MessagesResponse = serde_json::from_value(body).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Unexpected Claude response shape: {}", e))
        })?;

        let text = response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text);

        let tokens = response.usage.as_ref().map(|usage| TokenUsage {
            input_tokens: usage["input_tokens"].as_u64().unwrap_or(0),
            output_tokens: usage["output_tokens"].as_u64().unwrap_or(0),
        });

        Ok(UpstreamReply {
            text,
            usage: response.usage,
            tokens,
        })
    }
}
