use anyhow::{Context, Result, bail};
use clap::Parser;
use hn_digest::api::ApiService;
use hn_digest::config::AppConfig;
use hn_digest::digest;
use hn_digest::scrape::ScrapeService;
use hn_digest::utils::url::parse_story_ref;

/// Fetch a Hacker News discussion and the linked article as one compact,
/// LLM-friendly text document on stdout.
#[derive(Parser)]
#[command(name = "hn-digest", version)]
struct Cli {
    /// HN item id or URL, e.g. "46130187" or
    /// "https://news.ycombinator.com/item?id=46130187"
    story: String,

    /// Firecrawl API key override (falls back to FIRECRAWL_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries nothing but the rendered document.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if cli.api_key.is_some() {
        config.firecrawl_api_key = cli.api_key;
    }

    let Some(story_id) = parse_story_ref(&cli.story) else {
        bail!(
            "invalid story reference {:?}: expected an item id or an item?id= URL",
            cli.story
        );
    };

    let api = ApiService::new(config.fetch_timeout);
    let scraper = ScrapeService::new(config.firecrawl_api_key.clone(), config.scrape_timeout);

    let document = digest::run(api, scraper, &config, story_id)
        .await
        .with_context(|| format!("failed to build digest for item {story_id}"))?;

    println!("{document}");
    Ok(())
}
