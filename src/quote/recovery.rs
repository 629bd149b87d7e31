//! Response recovery
//!
//! Text surgery over a model reply: fence stripping and outermost-object
//! slicing, followed by a JSON parse. Malformed interior JSON is not repaired.
//! Any well-formed object is relayed, and conformance to `Quote` is checked
//! separately so an off-schema reply still reaches the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use super::types::Quote;
use crate::error::{AppError, AppResult};

/// Opening fence, bare or language-tagged
static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*").unwrap());

const FENCE_CLOSE: &str = "```";

/// Reduce a reply to the span that should hold the JSON object
pub fn extract_json_span(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(opener) = FENCE_OPEN.find(text) {
        text = &text[opener.end()..];
    }
    if let Some(stripped) = text.strip_suffix(FENCE_CLOSE) {
        text = stripped;
    }
    text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Parse a provider reply into one JSON object
pub fn recover_quote(provider: &'static str, raw: Option<&str>) -> AppResult<Value> {
    let raw = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(AppError::EmptyResponse { provider }),
    };

    let value: Value =
        serde_json::from_str(extract_json_span(raw)).map_err(AppError::ParseFailure)?;
    if !value.is_object() {
        return Err(AppError::ParseFailure(serde_json::Error::custom(
            "quote must be a JSON object",
        )));
    }
    Ok(value)
}

/// Check a recovered object against the typed quote
pub fn schema_mismatch(quote: &Value) -> Option<serde_json::Error> {
    Quote::deserialize(quote).err()
}
