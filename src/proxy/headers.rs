//! Header utilities for upstream provider calls
//!
//! Builds the minimal header set each provider needs. Caller headers are
//! never forwarded, and credentials are marked sensitive so they are
//! redacted from `Debug` output.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::error::{AppError, AppResult};

/// Build a JSON header map with the credential under `key_header`
pub fn build_credential_headers(key_header: &'static str, api_key: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut credential = HeaderValue::from_str(api_key).map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "API key contains characters that are not valid in a header"
        ))
    })?;
    credential.set_sensitive(true);

    headers.insert(HeaderName::from_static(key_header), credential);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
