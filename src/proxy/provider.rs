//! Provider abstraction layer
//!
//! A `ProviderDialect` describes one upstream API: its capabilities, its role
//! vocabulary, its endpoint template and how its bodies are shaped. The
//! `QuoteBackend` trait is the seam the route handler talks to.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::AppResult;
use crate::quote::{DecodingMode, Message, NormalizedRequest, Role};

/// Everything a dialect needs to shape one upstream request body
#[derive(Debug, Clone, Copy)]
pub struct UpstreamRequest<'a> {
    pub model: &'a str,
    pub mode: DecodingMode,
    pub system_instruction: &'a str,
    pub messages: &'a [Message],
    pub temperature: f64,
    pub max_output_tokens: u32,
}

/// Token counts reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// What came back from the provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamReply {
    /// Raw model text, if the response carried any
    pub text: Option<String>,
    /// Provider usage metadata, passed through to the caller verbatim
    pub usage: Option<Value>,
    /// Token counts parsed from the usage metadata
    pub tokens: Option<TokenUsage>,
}

/// Wire-level description of one upstream provider
///
/// # Security
///
/// Implementations MUST keep the credential out of the URL and out of any
/// error or log message. It only travels in a sensitive header.
pub trait ProviderDialect: Send + Sync {
    /// Provider name for logs, metrics and error messages
    fn name(&self) -> &'static str;

    /// Whether the API can constrain output to a JSON schema
    fn supports_schema_decoding(&self) -> bool;

    /// Role name the API uses for the model's own turns
    fn model_role(&self) -> &'static str;

    /// Full URL of the generation endpoint
    fn endpoint(&self, base_url: &str, model: &str) -> String;

    /// Authentication and versioning headers
    fn headers(&self, api_key: &str) -> AppResult<HeaderMap>;

    /// Provider JSON body for a normalized request
    fn build_body(&self, request: &UpstreamRequest<'_>) -> AppResult<Value>;

    /// Pull text and usage out of a provider response body
    fn parse_reply(&self, body: Value) -> AppResult<UpstreamReply>;

    /// Map a caller role onto the provider vocabulary
    fn wire_role(&self, role: Role) -> &'static str {
        match role {
            Role::User => "user",
            Role::Assistant => self.model_role(),
        }
    }
}

/// Generates a reply for a normalized request
#[async_trait]
pub trait QuoteBackend: Send + Sync {
    /// Provider name for logging and error messages
    fn name(&self) -> &'static str;

    /// Whether schema-constrained decoding is available
    fn supports_schema_decoding(&self) -> bool;

    /// Issue one upstream call. No retry.
    async fn generate(
        &self,
        request: &NormalizedRequest,
        system_instruction: &str,
    ) -> AppResult<UpstreamReply>;
}
