//! Concurrent fetch of the instruction document and price catalog
//!
//! Both documents are fetched on every request. Either one failing fails the
//! whole load. Nothing is cached or retried.

use tracing::{debug, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::metrics;

/// Separator placed between the instructions and the catalog
const REFERENCE_BANNER: &str = "\n\n---\n\n# REFERENCE DATA\n";

/// The two loaded documents, unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocs {
    pub instructions: String,
    pub catalog: String,
}

impl ReferenceDocs {
    /// Compose the system instruction sent to the provider
    pub fn system_instruction(&self) -> String {
        format!("{}{}{}", self.instructions, REFERENCE_BANNER, self.catalog)
    }
}

/// Fetches reference documents from fixed locations
#[derive(Debug, Clone)]
pub struct ReferenceLoader {
    client: reqwest::Client,
    skill_url: String,
    catalog_url: String,
}

impl ReferenceLoader {
    pub fn new(client: reqwest::Client, skill_url: String, catalog_url: String) -> Self {
        Self {
            client,
            skill_url,
            catalog_url,
        }
    }

    /// Fetch both documents concurrently, failing fast on the first error
    #[instrument(skip(self))]
    pub async fn load(&self) -> AppResult<ReferenceDocs> {
        let (instructions, catalog) = futures::try_join!(
            self.fetch("skill", &self.skill_url),
            self.fetch("catalog", &self.catalog_url),
        )?;

        Ok(ReferenceDocs {
            instructions,
            catalog,
        })
    }

    async fn fetch(&self, document: &'static str, url: &str) -> AppResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(document, error = %e.without_url(), "Reference fetch failed");
            metrics::record_reference_fetch(document, "error");
            AppError::FetchFailure(format!("{} request failed", document))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(document, status = %status, "Reference fetch returned non-success status");
            metrics::record_reference_fetch(document, "error");
            return Err(AppError::FetchFailure(format!(
                "{} returned {}",
                document,
                status.as_u16()
            )));
        }

        let text = response.text().await.map_err(|e| {
            warn!(document, error = %e.without_url(), "Reference body could not be read");
            metrics::record_reference_fetch(document, "error");
            AppError::FetchFailure(format!("{} body could not be read", document))
        })?;

        debug!(document, bytes = text.len(), "Reference document fetched");
        metrics::record_reference_fetch(document, "ok");
        Ok(text)
    }
}
