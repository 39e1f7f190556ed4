use html2text::from_read;
use once_cell::sync::Lazy;
use regex::Regex;

static IMG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img\s+[^>]*alt=["']([^"']*)["'][^>]*>"#).unwrap());

// Wide enough that html2text never hard-wraps prose; the renderer handles
// layout itself.
const RENDER_WIDTH: usize = 500;

/// Strip markup from an HN comment body and normalize it for compact output.
///
/// `<img>` tags become `[Image: alt]` placeholders, intra-line whitespace is
/// collapsed, and blank lines are dropped; paragraph breaks survive as single
/// newlines.
pub fn extract_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let with_placeholders = IMG_REGEX.replace_all(html, "[Image: $1]");
    let text = from_read(with_placeholders.as_bytes(), RENDER_WIDTH).unwrap_or_default();
    normalize(&text)
}

fn normalize(text: &str) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}
