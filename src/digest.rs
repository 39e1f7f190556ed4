use crate::api::ApiService;
use crate::config::AppConfig;
use crate::internal::builder::{BuildError, BuildLimits, ThreadBuilder};
use crate::internal::{merge, render};
use crate::scrape::ScrapeService;
use crate::utils::url::is_hn_internal;

/// Build the full digest document for one story id.
///
/// The root item is resolved first (its URL decides whether there is an
/// article to scrape), then the comment tree build and the article scrape run
/// concurrently. Article failures of any kind degrade to a discussion-only
/// document; only root failures are fatal.
pub async fn run(
    api: ApiService,
    scraper: ScrapeService,
    config: &AppConfig,
    story_id: u64,
) -> Result<String, BuildError> {
    let builder = ThreadBuilder::new(api, BuildLimits::from(config));
    let root = builder.fetch_root(story_id).await?;

    let article_url = root.url.clone().filter(|url| {
        if is_hn_internal(url) {
            tracing::info!(%url, "story links back to HN, skipping article scrape");
            false
        } else {
            true
        }
    });

    let article_task = async {
        let url = article_url.as_deref()?;
        match scraper.scrape_markdown(url).await {
            Ok(markdown) => Some(markdown),
            Err(err) => {
                tracing::warn!(url, %err, "article scrape failed, continuing with discussion only");
                None
            }
        }
    };

    let (thread, article) = tokio::join!(builder.build(root), article_task);

    let discussion = render::render(&thread);
    Ok(merge::merge(article.as_deref(), &discussion))
}
