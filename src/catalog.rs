//! Model catalog client.
//!
//! Callers validate preference writes against the live catalog and feed the
//! paged model listing from it. The store itself never talks to the
//! catalog; validation happens before any write.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::ApiError;

const CATALOG_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const CATALOG_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry in the model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}

/// Model catalog client trait
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// List the models currently offered by the provider.
    async fn list_models(&self) -> Result<Vec<ModelEntry>, ApiError>;
}

#[derive(Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

/// OpenAI-compatible `GET /models` client.
pub struct HttpModelCatalog {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpModelCatalog {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(CATALOG_HTTP_CONNECT_TIMEOUT)
            .timeout(CATALOG_HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ApiError::CatalogUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl ModelCatalog for HttpModelCatalog {
    async fn list_models(&self) -> Result<Vec<ModelEntry>, ApiError> {
        let url = format!("{}/models", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;
        let body: ModelsResponse = response.json().await.map_err(map_http_error)?;
        Ok(body.data)
    }
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_status() {
        let status = error.status().unwrap();
        ApiError::CatalogUnavailable(format!("Request failed with status {}: {}", status, error))
    } else if error.is_timeout() {
        ApiError::CatalogUnavailable(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::CatalogUnavailable(format!("Connection error: {}", error))
    } else {
        ApiError::CatalogUnavailable(format!("HTTP error: {}", error))
    }
}

/// Fixed in-memory catalog for tests and offline use.
pub struct StaticCatalog {
    models: Vec<ModelEntry>,
}

impl StaticCatalog {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: ids
                .into_iter()
                .map(|id| ModelEntry { id: id.into() })
                .collect(),
        }
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn list_models(&self) -> Result<Vec<ModelEntry>, ApiError> {
        Ok(self.models.clone())
    }
}

/// Result of validating a requested model id against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelMatch {
    /// The requested id exists verbatim.
    Exact(String),
    /// Only a case-insensitive match exists; carries the canonically cased
    /// id to surface back to the user.
    CaseInsensitive(String),
    NotFound,
}

impl ModelMatch {
    /// The canonical id to persist, if any match was found.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            ModelMatch::Exact(id) | ModelMatch::CaseInsensitive(id) => Some(id),
            ModelMatch::NotFound => None,
        }
    }
}

/// Validate a requested model id: exact match first, case-insensitive
/// fallback second.
pub fn match_model(catalog: &[ModelEntry], requested: &str) -> ModelMatch {
    if catalog.iter().any(|m| m.id == requested) {
        return ModelMatch::Exact(requested.to_string());
    }
    if let Some(entry) = catalog.iter().find(|m| m.id.eq_ignore_ascii_case(requested)) {
        return ModelMatch::CaseInsensitive(entry.id.clone());
    }
    ModelMatch::NotFound
}
