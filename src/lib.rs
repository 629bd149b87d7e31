//! Quote relay
//!
//! A stateless HTTP relay that turns booth documents into structured cost
//! quotes. Each request loads the instruction document and price catalog,
//! calls one upstream model (Gemini or Claude) and recovers a typed quote
//! from its reply.

pub mod config;
pub mod error;
pub mod metrics;
pub mod proxy;
pub mod quote;
pub mod reference;
pub mod routes;

use std::sync::Arc;

use anyhow::{anyhow, Result};

pub use crate::config::{Config, ProviderKind};
pub use crate::error::{AppError, AppResult};
pub use crate::proxy::{QuoteBackend, UpstreamInvoker};
pub use crate::quote::ModelPolicy;
pub use crate::reference::ReferenceLoader;

/// Application state shared across all request handlers
pub struct AppState {
    /// Instruction document and catalog fetcher
    pub references: ReferenceLoader,
    /// Model resolution and decoding-mode rules
    pub policy: ModelPolicy,
    /// Provider the relay forwards to
    pub backend: Arc<dyn QuoteBackend>,
}

impl AppState {
    /// Create a new application state for the configured provider
    pub fn new(config: Config) -> Result<Self> {
        // One pooled client for documents and provider. No timeout of our own.
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .build()?;

        let dialect = proxy::dialect_for(config.provider);
        let backend: Arc<dyn QuoteBackend> =
            Arc::new(UpstreamInvoker::new(http_client.clone(), dialect, &config));

        Self::with_backend(config, http_client, backend)
    }

    /// Create application state around an existing backend
    pub fn with_backend(
        config: Config,
        http_client: reqwest::Client,
        backend: Arc<dyn QuoteBackend>,
    ) -> Result<Self> {
        quote::schema::validate_schema_document()
            .map_err(|e| anyhow!("Generated quote schema is invalid: {}", e))?;

        let references = ReferenceLoader::new(
            http_client,
            config.skill_url,
            config.catalog_url,
        );

        let policy = ModelPolicy {
            supports_schema: backend.supports_schema_decoding(),
            default_model: config.default_model,
            text_only_prefixes: config.text_only_prefixes,
        };

        Ok(Self {
            references,
            policy,
            backend,
        })
    }
}
