use crate::internal::cache::Cache;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v2/scrape";

/// How long a scraped article stays in the local cache.
const ARTICLE_CACHE_TTL: Duration = Duration::from_secs(900);

/// Server-side cache window passed to the API, in milliseconds (48 hours).
const MAX_CACHE_AGE_MS: u64 = 172_800_000;

/// Failure modes of an article scrape. None of these are fatal to a digest
/// request; callers degrade to a discussion-only document.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no Firecrawl API key configured")]
    MissingApiKey,
    #[error("failed to reach scraping API: {0}")]
    Connection(String),
    #[error("scraping API returned {status}: {detail}")]
    Response { status: u16, detail: String },
    #[error("unexpected scraping API payload: {0}")]
    Malformed(String),
}

/// Client for the Firecrawl content-extraction API.
///
/// Given a URL it returns the article body as markdown. Requires a bearer
/// credential supplied at startup. Repeated scrapes of the same URL within
/// the TTL are served from an in-process cache.
#[derive(Clone)]
pub struct ScrapeService {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    cache: Cache<String, String>,
}

impl ScrapeService {
    pub fn new(api_key: Option<String>, request_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: FIRECRAWL_API_URL.to_string(),
            api_key,
            cache: Cache::new(ARTICLE_CACHE_TTL),
        }
    }

    /// Point the service at a different endpoint (mockito in tests).
    pub fn with_endpoint(api_key: Option<String>, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            cache: Cache::new(ARTICLE_CACHE_TTL),
        }
    }

    /// Scrape a URL and return its main content as markdown.
    pub async fn scrape_markdown(&self, target_url: &str) -> Result<String, ScrapeError> {
        let api_key = self.api_key.as_deref().ok_or(ScrapeError::MissingApiKey)?;

        if let Some(hit) = self.cache.get(&target_url.to_string()) {
            tracing::debug!(url = target_url, "article served from cache");
            return Ok(hit);
        }

        let payload = serde_json::json!({
            "url": target_url,
            "onlyMainContent": true,
            "maxAge": MAX_CACHE_AGE_MS,
            "parsers": ["pdf"],
            "formats": ["markdown"],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ScrapeError::Connection(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ScrapeError::Connection(err.to_string()))?;

        if !status.is_success() {
            return Err(ScrapeError::Response {
                status: status.as_u16(),
                detail: body.chars().take(200).collect(),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|err| ScrapeError::Malformed(err.to_string()))?;

        let markdown = value
            .get("data")
            .and_then(|data| data.get("markdown"))
            .and_then(|markdown| markdown.as_str())
            .ok_or_else(|| ScrapeError::Malformed("missing data.markdown field".to_string()))?;

        tracing::debug!(url = target_url, bytes = markdown.len(), "scraped article");
        self.cache.set(target_url.to_string(), markdown.to_string());
        Ok(markdown.to_string())
    }
}
