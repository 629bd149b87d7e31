//! Proxy module
//!
//! Upstream provider dialects and the invoker that calls them.

pub mod anthropic;
pub mod gemini;
pub mod headers;
pub mod invoker;
pub mod logging;
pub mod provider;

use std::sync::Arc;

pub use anthropic::AnthropicDialect;
pub use gemini::GeminiDialect;
pub use invoker::UpstreamInvoker;
pub use logging::RelayContext;
pub use provider::{ProviderDialect, QuoteBackend, TokenUsage, UpstreamReply, UpstreamRequest};

use crate::config::ProviderKind;

/// Dialect for the configured provider
pub fn dialect_for(kind: ProviderKind) -> Arc<dyn ProviderDialect> {
    match kind {
        ProviderKind::Gemini => Arc::new(GeminiDialect::new()),
        ProviderKind::Anthropic => Arc::new(AnthropicDialect::new()),
    }
}
