//! Document fetch and text extraction boundary.
//!
//! Downloads an attachment and decodes it as text; the caller truncates the
//! result to its configured maximum before persisting. This never runs
//! inside a store transaction.

use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::error::ApiError;

const DOCUMENT_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DOCUMENT_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Plain-text family only. Binary formats with embedded text (PDF and
/// friends) are out of reach without an extraction engine.
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "csv", "json", "log", "rst"];

pub fn supported_extensions() -> &'static [&'static str] {
    SUPPORTED_EXTENSIONS
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn is_supported_file(filename: &str) -> bool {
    extension_of(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// A downloaded, decoded document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub content: String,
    pub file_type: String,
}

pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(DOCUMENT_HTTP_CONNECT_TIMEOUT)
            .timeout(DOCUMENT_HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ApiError::DocumentFetchFailed(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Download `url` and decode it as text, tagging it with the file type
    /// derived from `filename`.
    pub async fn fetch(&self, url: &str, filename: &str) -> Result<FetchedDocument, ApiError> {
        let file_type = extension_of(filename)
            .ok_or_else(|| ApiError::UnsupportedDocument(filename.to_string()))?;
        if !SUPPORTED_EXTENSIONS.contains(&file_type.as_str()) {
            return Err(ApiError::UnsupportedDocument(format!(
                "{} (supported types: {})",
                filename,
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::DocumentFetchFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::DocumentFetchFailed(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::DocumentFetchFailed(e.to_string()))?;
        let content = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::DocumentNotText(filename.to_string()))?;

        info!(filename, file_type = %file_type, bytes = content.len(), "document fetched");
        Ok(FetchedDocument { content, file_type })
    }
}
