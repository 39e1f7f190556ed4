use crate::internal::models::{CommentNode, Thread};

/// One indentation unit per depth level.
const INDENT: &str = "  ";

const TRUNCATION_NOTE: &str =
    "NOTE: time limit reached before every branch was fetched; unresolved comments appear as [deleted]";

/// Serialize a thread into the compact discussion block.
///
/// Pure function of its input: the same `Thread` value always produces
/// byte-identical text. Relative ages were already captured at build time, so
/// nothing here consults the clock.
pub fn render(thread: &Thread) -> String {
    let mut out = String::new();

    out.push_str(&format!("STORY: {}\n", thread.title));
    out.push_str(&format!(
        "URL: {}\n",
        thread.url.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!(
        "AUTHOR: {} | POINTS: {} | TIME: {}\n",
        thread.author.as_deref().unwrap_or("(unknown)"),
        thread.points,
        thread.age
    ));
    out.push_str(&format!("TOTAL_COMMENTS: {}\n", thread.total_comments));
    if thread.truncated {
        out.push_str(TRUNCATION_NOTE);
        out.push('\n');
    }
    out.push('\n');

    for (index, node) in thread.comments.iter().enumerate() {
        out.push_str(&format!("COMMENT #{}\n", index + 1));
        render_node(&mut out, node);
        out.push('\n');
    }

    out
}

/// Pre-order walk of one subtree. Top-level nodes are tagged COMMENT, every
/// reply below them REPLY; body lines are indented to match the header.
fn render_node(out: &mut String, node: &CommentNode) {
    let prefix = INDENT.repeat(node.depth);
    let tag = if node.depth == 0 { "COMMENT" } else { "REPLY" };

    out.push_str(&format!(
        "{prefix}{tag} [{} @ {}] ID: {}\n",
        node.author_label(),
        node.age,
        node.id
    ));

    // An empty body still emits one (empty) line, so placeholder nodes keep
    // their slot visible.
    for line in node.text.split('\n') {
        out.push_str(&prefix);
        out.push_str(line);
        out.push('\n');
    }

    if node.depth == 0 && !node.children.is_empty() {
        out.push('\n');
    }

    for child in &node.children {
        render_node(out, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, author: &str, text: &str, depth: usize, children: Vec<CommentNode>) -> CommentNode {
        CommentNode {
            id,
            author: Some(author.to_string()),
            text: text.to_string(),
            age: "1h ago".to_string(),
            depth,
            children,
        }
    }

    fn sample_thread() -> Thread {
        let reply = node(103, "carol", "hello", 1, Vec::new());
        let first = node(101, "bob", "hi", 0, vec![reply]);
        let deleted = CommentNode::placeholder(102, 0);
        Thread {
            title: "T".to_string(),
            author: Some("alice".to_string()),
            points: 10,
            url: None,
            age: "2h ago".to_string(),
            total_comments: 3,
            max_depth: 1,
            truncated: false,
            comments: vec![first, deleted],
        }
    }

    #[test]
    fn renders_expected_document() {
        let expected = "\
STORY: T
URL: (none)
AUTHOR: alice | POINTS: 10 | TIME: 2h ago
TOTAL_COMMENTS: 3

COMMENT #1
COMMENT [bob @ 1h ago] ID: 101
hi

  REPLY [carol @ 1h ago] ID: 103
  hello

COMMENT #2
COMMENT [[deleted] @ unknown] ID: 102

";
        assert_eq!(render(&sample_thread()), expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let thread = sample_thread();
        assert_eq!(render(&thread), render(&thread));
    }

    #[test]
    fn external_url_is_shown() {
        let mut thread = sample_thread();
        thread.url = Some("https://example.com/a".to_string());
        assert!(render(&thread).contains("URL: https://example.com/a\n"));
    }

    #[test]
    fn child_indentation_is_one_unit_deeper() {
        let deep = node(3, "c", "deepest", 2, Vec::new());
        let mid = node(2, "b", "middle", 1, vec![deep]);
        let top = node(1, "a", "top", 0, vec![mid]);
        let thread = Thread {
            title: "S".to_string(),
            author: None,
            points: 0,
            url: None,
            age: "unknown".to_string(),
            total_comments: 3,
            max_depth: 2,
            truncated: false,
            comments: vec![top],
        };

        let out = render(&thread);
        assert!(out.contains("\nCOMMENT [a @ 1h ago] ID: 1\n"));
        assert!(out.contains("\n  REPLY [b @ 1h ago] ID: 2\n"));
        assert!(out.contains("\n    REPLY [c @ 1h ago] ID: 3\n"));
        assert!(out.contains("\n  middle\n"));
        assert!(out.contains("\n    deepest\n"));
    }

    #[test]
    fn multiline_bodies_keep_the_comment_indent() {
        let top = node(1, "a", "first\nsecond", 1, Vec::new());
        let parent = node(2, "b", "p", 0, vec![top]);
        let thread = Thread {
            title: "S".to_string(),
            author: None,
            points: 0,
            url: None,
            age: "unknown".to_string(),
            total_comments: 2,
            max_depth: 1,
            truncated: false,
            comments: vec![parent],
        };

        let out = render(&thread);
        assert!(out.contains("\n  first\n  second\n"));
    }

    #[test]
    fn truncation_note_appears_only_when_truncated() {
        let mut thread = sample_thread();
        assert!(!render(&thread).contains("NOTE:"));
        thread.truncated = true;
        let out = render(&thread);
        assert!(out.contains("NOTE: time limit reached"));
        // Note sits inside the header block, before the first comment group.
        assert!(out.find("NOTE:").expect("note") < out.find("COMMENT #1").expect("group"));
    }
}
