pub const ARTICLE_HEADER: &str = "# ARTICLE CONTENT";
pub const DISCUSSION_HEADER: &str = "# HACKER NEWS DISCUSSION";

/// Combine scraped article text with the rendered discussion.
///
/// Article first, then the discussion, separated by a horizontal rule. When
/// there is no article (text post, HN-internal link, or a failed scrape) only
/// the discussion section is emitted; there is never an empty article header.
pub fn merge(article: Option<&str>, discussion: &str) -> String {
    match article {
        Some(article) => format!(
            "{ARTICLE_HEADER}\n\n{}\n\n---\n\n{DISCUSSION_HEADER}\n\n{discussion}",
            article.trim_end()
        ),
        None => format!("{DISCUSSION_HEADER}\n\n{discussion}"),
    }
}
