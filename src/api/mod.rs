use crate::internal::models::RawItem;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

const HN_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// Failure modes of a single item fetch.
///
/// `NotFound` is structural, not exceptional: the tree builder turns it into a
/// placeholder node. `Transient` is the only variant eligible for retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("item {0} not found")]
    NotFound(u64),
    #[error("transient fetch failure for item {id}: {reason}")]
    Transient { id: u64, reason: String },
    #[error("malformed response for item {id}: {reason}")]
    Malformed { id: u64, reason: String },
}

/// HTTP client for the public HN Firebase item API.
///
/// A pure I/O boundary: no retries, no caching, no interpretation of item
/// contents beyond deserializing the `RawItem` shape. Safe to clone and use
/// concurrently; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
}

impl ApiService {
    pub fn new(request_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: HN_API_BASE_URL.to_string(),
        }
    }

    /// Point the service at a different endpoint (mockito in tests).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch a single item by id.
    ///
    /// The Firebase API reports unknown ids with a literal `null` body and a
    /// 200 status, so both that and a 404 map to [`ApiError::NotFound`].
    pub async fn fetch_item(&self, id: u64) -> Result<RawItem, ApiError> {
        let url = format!("{}item/{}.json", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::Transient {
                id,
                reason: err.to_string(),
            })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }

        if status.is_server_error() {
            return Err(ApiError::Transient {
                id,
                reason: format!("server returned {status}"),
            });
        }

        if !status.is_success() {
            return Err(ApiError::Malformed {
                id,
                reason: format!("unexpected status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transient {
                id,
                reason: format!("failed to read body: {err}"),
            })?;

        if body.trim() == "null" {
            return Err(ApiError::NotFound(id));
        }

        tracing::trace!(id, bytes = body.len(), "fetched item");

        serde_json::from_str(&body).map_err(|err| ApiError::Malformed {
            id,
            reason: err.to_string(),
        })
    }
}
