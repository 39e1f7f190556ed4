use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_DEPTH: usize = 32;
const DEFAULT_CONCURRENCY: usize = 16;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BUILD_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Process-level configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenv). Nothing here is renegotiated per
/// request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential for the article scraping API; absent means every digest is
    /// discussion-only.
    pub firecrawl_api_key: Option<String>,
    pub max_depth: usize,
    pub concurrency: usize,
    /// Per-request timeout for item fetches.
    pub fetch_timeout: Duration,
    /// Wall-clock budget for assembling one comment tree.
    pub build_timeout: Duration,
    pub scrape_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firecrawl_api_key: None,
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            build_timeout: Duration::from_secs(DEFAULT_BUILD_TIMEOUT_SECS),
            scrape_timeout: Duration::from_secs(DEFAULT_SCRAPE_TIMEOUT_SECS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            firecrawl_api_key: std::env::var("FIRECRAWL_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            max_depth: env_parse("HN_DIGEST_MAX_DEPTH", DEFAULT_MAX_DEPTH),
            concurrency: env_parse("HN_DIGEST_CONCURRENCY", DEFAULT_CONCURRENCY),
            fetch_timeout: Duration::from_secs(env_parse(
                "HN_DIGEST_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            build_timeout: Duration::from_secs(env_parse(
                "HN_DIGEST_BUILD_TIMEOUT_SECS",
                DEFAULT_BUILD_TIMEOUT_SECS,
            )),
            scrape_timeout: Duration::from_secs(env_parse(
                "HN_DIGEST_SCRAPE_TIMEOUT_SECS",
                DEFAULT_SCRAPE_TIMEOUT_SECS,
            )),
            retry_attempts: env_parse("HN_DIGEST_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS),
            retry_delay: Duration::from_millis(env_parse(
                "HN_DIGEST_RETRY_DELAY_MS",
                DEFAULT_RETRY_DELAY_MS,
            )),
        }
    }
}

/// Read and parse one env var, keeping the default (with a warning) when the
/// value is present but unparseable.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, %raw, "ignoring unparseable config value");
                default
            }
        },
        Err(_) => default,
    }
}
