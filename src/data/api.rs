//! Remote catalog access.
//!
//! [`CatalogApi`] is the seam between the domain layer and the network;
//! [`ArchiveClient`] is the production implementation over the archive's
//! advanced-search and metadata endpoints. The domain layer only ever
//! sees mapped models and [`ApiError`] descriptions, never transport
//! details.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::data::mappers::{self, MetadataResponse, SearchResponse};
use crate::data::models::{Item, ItemDetail, SearchQuery};

/// Errors that can occur talking to the remote catalog.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to construct the HTTP client.
    #[error("Failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or timed out.
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("'{url}' returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be decoded.
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Asynchronous catalog operations, implemented by the real client and
/// by test stubs.
pub trait CatalogApi: Send + Sync {
    /// Run a search and return the mapped result items.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Item>, ApiError>> + Send;

    /// Fetch one item's full metadata.
    fn metadata(&self, item_id: &str)
        -> impl Future<Output = Result<ItemDetail, ApiError>> + Send;
}

/// HTTP client for an archive.org-style catalog.
pub struct ArchiveClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff_base: Duration,
}

impl ArchiveClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff_base: Duration::from_millis(config.retry_backoff_base_ms),
        })
    }

    /// GET a JSON document, retrying connect failures with exponential
    /// backoff.
    async fn get_json<T, P>(&self, url: String, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let mut attempt = 0u32;
        loop {
            let result = self.http.get(&url).query(params).send().await;
            match result {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        return Err(ApiError::Status {
                            url,
                            status: status.as_u16(),
                        });
                    }
                    return response
                        .json::<T>()
                        .await
                        .map_err(|source| ApiError::Decode { url, source });
                }
                Err(source) if source.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = self.retry_backoff_base * 2u32.saturating_pow(attempt - 1);
                    warn!(%url, attempt, ?backoff, "connect failed, retrying");
                    tokio::time::sleep(backoff).await;
                }
                Err(source) => return Err(ApiError::Request { url, source }),
            }
        }
    }
}

impl CatalogApi for ArchiveClient {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Item>, ApiError>> + Send {
        async move {
            let url = format!("{}/advancedsearch.php", self.base_url);
            let expression = query.to_query_string();
            debug!(%expression, "catalog search");
            let params = [
                ("q", expression.as_str()),
                ("fl[]", "identifier"),
                ("fl[]", "title"),
                ("fl[]", "creator"),
                ("fl[]", "mediatype"),
                ("rows", "50"),
                ("output", "json"),
            ];
            let response: SearchResponse = self.get_json(url, &params).await?;
            Ok(mappers::map_search_docs(response.response.docs))
        }
    }

    fn metadata(
        &self,
        item_id: &str,
    ) -> impl Future<Output = Result<ItemDetail, ApiError>> + Send {
        async move {
            let url = format!("{}/metadata/{item_id}", self.base_url);
            debug!(%url, "catalog metadata");
            let params: &[(&str, &str)] = &[];
            let response: MetadataResponse = self.get_json(url, params).await?;
            Ok(mappers::map_metadata(response))
        }
    }
}
