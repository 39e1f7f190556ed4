/// Parse a story reference into an item id.
///
/// Accepts a bare non-negative integer ("46130187") or any URL carrying an
/// `item?id=` query parameter ("https://news.ycombinator.com/item?id=46130187").
/// Everything else is rejected here, before any fetch happens.
pub fn parse_story_ref(input: &str) -> Option<u64> {
    let input = input.trim();

    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }

    let rest = input.split("item?id=").nth(1)?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// True when a story URL points back at HN itself (Ask HN, Show HN self
/// links). Those have no external article to scrape.
pub fn is_hn_internal(url: &str) -> bool {
    extract_domain(url).is_some_and(|domain| domain == "news.ycombinator.com")
}

/// Host portion of a URL, without scheme, port, path, query, or fragment.
pub fn extract_domain(url: &str) -> Option<String> {
    let url = url.trim();
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    let host = without_scheme
        .split(['/', '?', '#'])
        .next()?
        .split(':')
        .next()?;

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
