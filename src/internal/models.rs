use serde::Deserialize;

/// Author sentinel for comments whose content is gone (deleted, dead, or
/// unfetchable). The tree keeps its shape; this is what the slot renders as.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// One item record exactly as the HN Firebase API returns it. Stories and
/// comments share this loosely-typed shape; the discriminant lives in the
/// `type` field and nowhere else.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub by: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    pub score: Option<u64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub kids: Option<Vec<u64>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

/// Item discriminant, derived solely from the source `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Story,
    Comment,
    Job,
    Unknown,
}

impl RawItem {
    pub fn item_kind(&self) -> ItemKind {
        match self.kind.as_deref() {
            Some("story") => ItemKind::Story,
            Some("comment") => ItemKind::Comment,
            Some("job") => ItemKind::Job,
            _ => ItemKind::Unknown,
        }
    }

    /// Child ids in source order; empty slice when the item has none.
    pub fn child_ids(&self) -> &[u64] {
        self.kids.as_deref().unwrap_or(&[])
    }
}

/// A processed comment. Built once during tree assembly, immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub id: u64,
    /// `None` renders as the [`DELETED_AUTHOR`] sentinel.
    pub author: Option<String>,
    /// Plain text, markup already stripped; empty for placeholder nodes.
    pub text: String,
    /// Relative age string, captured at build time.
    pub age: String,
    /// Distance from the story root; top-level comments are 0.
    pub depth: usize,
    /// Replies in source order.
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Stand-in for a deleted, dead, or unfetchable comment.
    pub fn placeholder(id: u64, depth: usize) -> Self {
        Self {
            id,
            author: None,
            text: String::new(),
            age: "unknown".to_string(),
            depth,
            children: Vec::new(),
        }
    }

    pub fn author_label(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }

    /// Node count of this subtree, itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    /// Depth of the deepest node in this subtree.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(Self::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// The assembled discussion for one story. Owns every node transitively.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub title: String,
    pub author: Option<String>,
    pub points: u64,
    /// `None` for self/text posts (Ask HN and friends).
    pub url: Option<String>,
    pub age: String,
    /// Count of every materialized node, placeholders included. Computed once
    /// at build completion.
    pub total_comments: usize,
    /// Deepest depth reached anywhere in the tree.
    pub max_depth: usize,
    /// Set when the build deadline expired before every branch resolved.
    pub truncated: bool,
    pub comments: Vec<CommentNode>,
}
