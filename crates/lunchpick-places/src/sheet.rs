//! Fetching the raw place list.
//!
//! The list is a spreadsheet published as CSV. Parsing happens in
//! `lunchpick_core`; this module only moves bytes and reports failure.

use std::path::Path;

use reqwest::Client;

use crate::error::PlacesError;
use crate::http::HttpSettings;
use crate::retry::retry_with_backoff;

/// Client for a published-sheet CSV export.
pub struct SheetClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SheetClient {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &HttpSettings) -> Result<Self, PlacesError> {
        Ok(Self {
            client: settings.build_client()?,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Download the CSV body at `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UnexpectedStatus`] for a non-2xx response.
    /// - [`PlacesError::Http`] on network failure after all retries.
    pub async fn fetch_csv(&self, url: &str) -> Result<String, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
                .header(reqwest::header::CACHE_CONTROL, "no-cache")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(PlacesError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            tracing::debug!(url, bytes = body.len(), "fetched place sheet");
            Ok(body)
        })
        .await
    }
}

/// Read a local CSV place list.
///
/// # Errors
///
/// Returns [`PlacesError::Io`] if the file cannot be read.
pub async fn read_places_file(path: &Path) -> Result<String, PlacesError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PlacesError::Io {
            path: path.display().to_string(),
            source,
        })
}
