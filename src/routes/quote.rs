//! Quote relay handler
//!
//! `POST` runs the relay, `OPTIONS` answers preflight, anything else is 405.
//! Flow: parse, normalize, load references, call the provider, recover the
//! quote. Every failure becomes the `worker_error` envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, Instrument};

use crate::{
    error::{AppError, AppResult},
    metrics,
    proxy::RelayContext,
    quote::{normalize, recover_quote, schema_mismatch, GenerationRequest, QuoteResponse},
    AppState,
};

/// Entry point for every path
pub async fn relay(State(state): State<Arc<AppState>>, method: Method, body: Bytes) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => handle_post(state, body).await,
        other => {
            debug!(method = %other, "Rejecting unsupported method");
            AppError::MethodNotAllowed.into_response()
        }
    }
}

async fn handle_post(state: Arc<AppState>, body: Bytes) -> Response {
    let mut ctx = RelayContext::new(state.backend.name());
    let span = ctx.create_span();

    let result = generate_quote(&state, &body, &mut ctx).instrument(span).await;
    let duration = ctx.start_time.elapsed().as_secs_f64();

    match result {
        Ok(response) => {
            metrics::record_request("ok", ctx.model_label(), duration);
            Json(response).into_response()
        }
        Err(err) => {
            ctx.log_error(&err);
            metrics::record_request(err.kind(), ctx.model_label(), duration);
            err.into_response()
        }
    }
}

async fn generate_quote(
    state: &AppState,
    body: &[u8],
    ctx: &mut RelayContext,
) -> AppResult<QuoteResponse> {
    let request: GenerationRequest =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    ctx.message_count = request.messages.len();

    // Empty conversations stop here, before any fetch or provider call
    let normalized = normalize(&request, &state.policy)?;
    ctx.set_model(normalized.model.clone(), normalized.mode);
    ctx.log_request_start();

    let docs = state.references.load().await?;
    ctx.log_references_loaded(docs.instructions.len(), docs.catalog.len());

    let reply = state
        .backend
        .generate(&normalized, &docs.system_instruction())
        .await?;

    if let Some(tokens) = reply.tokens {
        metrics::record_tokens("input", tokens.input_tokens, &normalized.model);
        metrics::record_tokens("output", tokens.output_tokens, &normalized.model);
    }

    let quote = recover_quote(state.backend.name(), reply.text.as_deref())?;
    if let Some(mismatch) = schema_mismatch(&quote) {
        ctx.log_schema_mismatch(&mismatch);
        metrics::record_schema_mismatch(&normalized.model);
    }
    ctx.log_request_complete(reply.tokens);

    Ok(QuoteResponse {
        quote,
        model: normalized.model,
        usage: reply.usage,
    })
}
