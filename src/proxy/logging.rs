//! Request logging for quote relays
//!
//! One `RelayContext` per inbound request. It carries a short correlation id
//! through every log line from receipt to the final envelope.

use std::time::Instant;
use tracing::{error, info, warn, Span};
use uuid::Uuid;

use crate::error::AppError;
use crate::quote::DecodingMode;

use super::provider::TokenUsage;

/// Context for tracking one relay through the system
#[derive(Debug, Clone)]
pub struct RelayContext {
    /// Short identifier for log correlation
    pub trace_id: String,
    pub start_time: Instant,
    /// Provider handling this request
    pub provider: &'static str,
    /// Resolved model, once known
    pub model: Option<String>,
    /// Decoding strategy, once known
    pub mode: Option<DecodingMode>,
    /// Number of caller messages
    pub message_count: usize,
}

impl RelayContext {
    pub fn new(provider: &'static str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(),
            start_time: Instant::now(),
            provider,
            model: None,
            mode: None,
            message_count: 0,
        }
    }

    /// Record the resolved model and decoding mode
    pub fn set_model(&mut self, model: impl Into<String>, mode: DecodingMode) {
        self.model = Some(model.into());
        self.mode = Some(mode);
    }

    /// Model label for metrics, `unknown` before normalization
    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("unknown")
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_request_start(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            mode = ?self.mode,
            messages = %self.message_count,
            "Quote request started"
        );
    }

    pub fn log_references_loaded(&self, skill_len: usize, catalog_len: usize) {
        info!(
            trace_id = %self.trace_id,
            skill_len = %skill_len,
            catalog_len = %catalog_len,
            elapsed_ms = %self.elapsed_ms(),
            "Reference documents loaded"
        );
    }

    /// The reply parsed as JSON but does not fit the quote types
    pub fn log_schema_mismatch(&self, mismatch: &serde_json::Error) {
        warn!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            mismatch = %mismatch,
            "Relaying quote that does not match the schema"
        );
    }

    pub fn log_request_complete(&self, tokens: Option<TokenUsage>) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            mode = ?self.mode,
            input_tokens = ?tokens.map(|t| t.input_tokens),
            output_tokens = ?tokens.map(|t| t.output_tokens),
            elapsed_ms = %self.elapsed_ms(),
            "Quote request completed"
        );
    }

    /// Log request failure. Error messages never carry credentials.
    pub fn log_error(&self, err: &AppError) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            kind = %err.kind(),
            elapsed_ms = %self.elapsed_ms(),
            error = %err,
            "Quote request failed"
        );
    }

    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "quote_relay",
            trace_id = %self.trace_id,
            provider = %self.provider,
        )
    }
}
