use hn_digest::internal::models::{CommentNode, Thread};
use hn_digest::internal::render::render;
use hn_digest::utils::url::parse_story_ref;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct NodeSpec {
    author: Option<String>,
    text: String,
    children: Vec<NodeSpec>,
}

fn node_spec() -> impl Strategy<Value = NodeSpec> {
    let leaf = (proptest::option::of("[a-z]{1,8}"), "[a-z ]{0,30}").prop_map(|(author, text)| {
        NodeSpec {
            author,
            text,
            children: Vec::new(),
        }
    });
    leaf.prop_recursive(4, 24, 4, |inner| {
        (
            proptest::option::of("[a-z]{1,8}"),
            "[a-z ]{0,30}",
            proptest::collection::vec(inner, 0..4),
        )
            .prop_map(|(author, text, children)| NodeSpec {
                author,
                text,
                children,
            })
    })
}

fn materialize(spec: &NodeSpec, depth: usize, next_id: &mut u64) -> CommentNode {
    let id = *next_id;
    *next_id += 1;
    let children = spec
        .children
        .iter()
        .map(|child| materialize(child, depth + 1, next_id))
        .collect();
    CommentNode {
        id,
        author: spec.author.clone(),
        text: spec.text.clone(),
        age: "1h ago".to_string(),
        depth,
        children,
    }
}

fn thread_from(specs: &[NodeSpec]) -> Thread {
    let mut next_id = 1;
    let comments: Vec<CommentNode> = specs
        .iter()
        .map(|spec| materialize(spec, 0, &mut next_id))
        .collect();
    let total_comments = comments.iter().map(CommentNode::subtree_len).sum();
    let max_depth = comments
        .iter()
        .map(CommentNode::max_depth)
        .max()
        .unwrap_or(0);
    Thread {
        title: "prop".to_string(),
        author: Some("op".to_string()),
        points: 1,
        url: None,
        age: "1d ago".to_string(),
        total_comments,
        max_depth,
        truncated: false,
        comments,
    }
}

fn check_indent(out: &str, node: &CommentNode) {
    let needle = format!("ID: {}", node.id);
    let line = out
        .lines()
        .find(|line| line.ends_with(&needle) && line.contains('['))
        .expect("header line present");
    let indent = line.len() - line.trim_start().len();
    assert_eq!(indent, node.depth * 2);
    for child in &node.children {
        check_indent(out, child);
    }
}

proptest! {
    #[test]
    fn parse_story_ref_never_panics(s in "\\PC*") {
        let _ = parse_story_ref(&s);
    }

    #[test]
    fn parse_story_ref_accepts_any_plain_id(id in 0u64..1_000_000_000_000) {
        prop_assert_eq!(parse_story_ref(&id.to_string()), Some(id));
        let url = format!("https://news.ycombinator.com/item?id={id}");
        prop_assert_eq!(parse_story_ref(&url), Some(id));
    }

    #[test]
    fn render_is_deterministic(specs in proptest::collection::vec(node_spec(), 0..4)) {
        let thread = thread_from(&specs);
        prop_assert_eq!(render(&thread), render(&thread));
    }

    #[test]
    fn every_header_line_is_indented_two_spaces_per_depth(
        specs in proptest::collection::vec(node_spec(), 1..4)
    ) {
        let thread = thread_from(&specs);
        let out = render(&thread);
        for node in &thread.comments {
            check_indent(&out, node);
        }
    }

    #[test]
    fn top_level_count_matches_group_headers(
        specs in proptest::collection::vec(node_spec(), 0..5)
    ) {
        let thread = thread_from(&specs);
        let out = render(&thread);
        let groups = out
            .lines()
            .filter(|line| line.starts_with("COMMENT #"))
            .count();
        prop_assert_eq!(groups, thread.comments.len());
    }
}
