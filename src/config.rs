//! Configuration management for the quote relay
//!
//! Configuration is loaded from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::fmt;
use std::net::SocketAddr;

/// Default instruction document (quote-generator skill)
pub const DEFAULT_SKILL_URL: &str =
    "https://raw.githubusercontent.com/blue-sky-flyer/boothiq1/main/skills/quote-generator/SKILL.md";

/// Default reference price catalog
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/blue-sky-flyer/boothiq1/main/MASTER_CATALOG.md";

/// Upstream model provider served by this relay instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Anthropic,
}

impl ProviderKind {
    /// Parse the `RELAY_PROVIDER` value
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => bail!("Unknown RELAY_PROVIDER '{}', expected gemini or anthropic", other),
        }
    }

    /// Model used when the caller does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Which provider this instance relays to
    pub provider: ProviderKind,
    /// Provider API credential, never accepted from callers
    pub api_key: String,
    /// Provider API base URL
    pub api_url: String,
    /// Model used when the request has none
    pub default_model: String,
    /// Model id prefixes that must not use schema-constrained decoding
    pub text_only_prefixes: Vec<String>,
    /// Sampling temperature sent upstream
    pub temperature: f64,
    /// Output token ceiling sent upstream
    pub max_output_tokens: u32,

    /// Instruction document location
    pub skill_url: String,
    /// Price catalog location
    pub catalog_url: String,

    /// Prometheus exporter address (disabled when unset)
    pub metrics_addr: Option<SocketAddr>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let provider = ProviderKind::parse(
            &env::var("RELAY_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
        )?;

        let (api_key, api_url) = match provider {
            ProviderKind::Gemini => (
                env::var("GOOGLE_API_KEY")
                    .context("GOOGLE_API_KEY must be set for the gemini provider")?,
                env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".to_string()
                }),
            ),
            ProviderKind::Anthropic => (
                env::var("ANTHROPIC_API_KEY")
                    .context("ANTHROPIC_API_KEY must be set for the anthropic provider")?,
                env::var("ANTHROPIC_API_URL")
                    .unwrap_or_else(|_| "https://api.anthropic.com/v1".to_string()),
            ),
        };

        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            provider,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            default_model: env::var("RELAY_DEFAULT_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| provider.default_model().to_string()),
            text_only_prefixes: parse_prefixes(
                &env::var("TEXT_ONLY_MODEL_PREFIXES").unwrap_or_else(|_| "gemini-3".to_string()),
            ),
            temperature: env::var("RELAY_TEMPERATURE")
                .unwrap_or_else(|_| "0.1".to_string())
                .parse()
                .context("Invalid RELAY_TEMPERATURE")?,
            max_output_tokens: env::var("RELAY_MAX_OUTPUT_TOKENS")
                .unwrap_or_else(|_| "4096".to_string())
                .parse()
                .context("Invalid RELAY_MAX_OUTPUT_TOKENS")?,

            skill_url: env::var("SKILL_URL").unwrap_or_else(|_| DEFAULT_SKILL_URL.to_string()),
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),

            metrics_addr: env::var("METRICS_ADDR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.parse())
                .transpose()
                .context("Invalid METRICS_ADDR")?,
            log_json: env::var("RELAY_LOG_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("text_only_prefixes", &self.text_only_prefixes)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("skill_url", &self.skill_url)
            .field("catalog_url", &self.catalog_url)
            .field("metrics_addr", &self.metrics_addr)
            .field("log_json", &self.log_json)
            .finish()
    }
}

fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
