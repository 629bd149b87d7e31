//! Upstream invoker
//!
//! One HTTP client polymorphic over a `ProviderDialect`. Issues exactly one
//! call per request and surfaces any non-success status as fatal.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::provider::{ProviderDialect, QuoteBackend, UpstreamReply, UpstreamRequest};
use crate::{
    config::Config,
    error::{AppError, AppResult},
    quote::NormalizedRequest,
};

/// Provider client for quote generation
pub struct UpstreamInvoker {
    client: reqwest::Client,
    dialect: Arc<dyn ProviderDialect>,
    base_url: String,
    api_key: String,
    temperature: f64,
    max_output_tokens: u32,
}

impl UpstreamInvoker {
    /// Create a new invoker for the configured provider
    pub fn new(client: reqwest::Client, dialect: Arc<dyn ProviderDialect>, config: &Config) -> Self {
        Self {
            client,
            dialect,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[async_trait]
impl QuoteBackend for UpstreamInvoker {
    fn name(&self) -> &'static str {
        self.dialect.name()
    }

    fn supports_schema_decoding(&self) -> bool {
        self.dialect.supports_schema_decoding()
    }

    #[instrument(skip(self, request, system_instruction), fields(model = %request.model, mode = ?request.mode))]
    async fn generate(
        &self,
        request: &NormalizedRequest,
        system_instruction: &str,
    ) -> AppResult<UpstreamReply> {
        let url = self.dialect.endpoint(&self.base_url, &request.model);
        let body = self.dialect.build_body(&UpstreamRequest {
            model: &request.model,
            mode: request.mode,
            system_instruction,
            messages: &request.messages,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        })?;

        debug!(
            provider = self.dialect.name(),
            url = %url,
            messages = request.messages.len(),
            system_len = system_instruction.len(),
            "Sending request to provider"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.dialect.headers(&self.api_key)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send request to provider");
                e.without_url()
            })?;

        let status = response.status();
        debug!(status = %status, "Received response from provider");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Provider request failed");
            return Err(AppError::UpstreamFailure {
                provider: self.dialect.name(),
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = response.json().await.map_err(reqwest::Error::without_url)?;
        self.dialect.parse_reply(payload)
    }
}
