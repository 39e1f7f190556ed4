use crate::api::{ApiError, ApiService};
use crate::internal::models::{CommentNode, ItemKind, RawItem, Thread};
use crate::utils::datetime::{format_relative, unix_now};
use crate::utils::html::extract_text;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::{Instant, sleep};

/// Fatal build failures. Everything below the root degrades to a placeholder
/// instead of surfacing here; without a valid root story there is nothing to
/// render, so root problems are the only hard errors.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("item {id} has kind {found:?}, expected a story")]
    InvalidRoot { id: u64, found: String },
    #[error(transparent)]
    Root(#[from] ApiError),
}

/// Tuning knobs for one tree build. The retry bound and delay are deliberately
/// separate settings so the degrade-to-placeholder policy can be made more or
/// less aggressive without touching the code.
#[derive(Debug, Clone)]
pub struct BuildLimits {
    /// Deepest comment level fetched; replies below it are dropped.
    pub max_depth: usize,
    /// In-flight item fetches across the whole build.
    pub concurrency: usize,
    /// Total attempts per item on transient failures (1 = no retry).
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    /// Wall-clock budget for the whole build. Expiry truncates, never fails.
    pub build_timeout: Duration,
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            concurrency: 16,
            retry_attempts: 2,
            retry_delay: Duration::from_millis(500),
            build_timeout: Duration::from_secs(120),
        }
    }
}

impl From<&crate::config::AppConfig> for BuildLimits {
    fn from(config: &crate::config::AppConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            concurrency: config.concurrency,
            retry_attempts: config.retry_attempts,
            retry_delay: config.retry_delay,
            build_timeout: config.build_timeout,
        }
    }
}

/// Recursively assembles a [`Thread`] from the item API.
///
/// Sibling subtrees are fetched concurrently behind a shared semaphore;
/// results come back in source child order regardless of completion order.
pub struct ThreadBuilder {
    api: ApiService,
    limits: BuildLimits,
}

/// State shared by every fetch of one build.
struct WalkCtx {
    api: ApiService,
    limits: BuildLimits,
    permits: Semaphore,
    deadline: Instant,
    truncated: AtomicBool,
    /// Reference clock for relative ages, captured once per build.
    now: i64,
}

impl ThreadBuilder {
    pub fn new(api: ApiService, limits: BuildLimits) -> Self {
        Self { api, limits }
    }

    /// Resolve and validate the root story. Unlike comment fetches, failures
    /// here are fatal.
    pub async fn fetch_root(&self, id: u64) -> Result<RawItem, BuildError> {
        let root = fetch_with_retry(
            &self.api,
            id,
            self.limits.retry_attempts,
            self.limits.retry_delay,
        )
        .await?;

        if root.item_kind() != ItemKind::Story {
            return Err(BuildError::InvalidRoot {
                id,
                found: root.kind.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        Ok(root)
    }

    /// Walk the root's child list and materialize the full comment tree.
    ///
    /// Never fails: bad branches become placeholders, and an expired deadline
    /// marks the thread truncated while keeping everything already resolved.
    pub async fn build(&self, root: RawItem) -> Thread {
        let now = unix_now();
        let ctx = Arc::new(WalkCtx {
            api: self.api.clone(),
            limits: self.limits.clone(),
            permits: Semaphore::new(self.limits.concurrency.max(1)),
            deadline: Instant::now() + self.limits.build_timeout,
            truncated: AtomicBool::new(false),
            now,
        });

        let comments = resolve_children(ctx.clone(), root.child_ids().to_vec(), 0).await;

        // Derived aggregates are computed exactly once, here.
        let total_comments = comments.iter().map(CommentNode::subtree_len).sum();
        let max_depth = comments
            .iter()
            .map(CommentNode::max_depth)
            .max()
            .unwrap_or(0);
        let truncated = ctx.truncated.load(Ordering::Relaxed);

        tracing::info!(
            story = root.id,
            total_comments,
            max_depth,
            truncated,
            "assembled comment tree"
        );

        Thread {
            title: root.title.clone().unwrap_or_else(|| "(untitled)".to_string()),
            author: root.by.clone(),
            points: root.score.unwrap_or(0),
            url: root.url.clone(),
            age: format_relative(root.time, now),
            total_comments,
            max_depth,
            truncated,
            comments,
        }
    }
}

/// Resolve an ordered child list into an ordered node list.
///
/// `buffered` polls up to `concurrency` sibling futures at once but yields
/// results in input order, so completion timing never reorders siblings.
fn resolve_children(
    ctx: Arc<WalkCtx>,
    ids: Vec<u64>,
    depth: usize,
) -> BoxFuture<'static, Vec<CommentNode>> {
    async move {
        if ids.is_empty() {
            return Vec::new();
        }

        let width = ctx.limits.concurrency.max(1);
        stream::iter(ids.into_iter().map(|id| {
            let ctx = ctx.clone();
            resolve_subtree(ctx, id, depth)
        }))
        .buffered(width)
        .collect()
        .await
    }
    .boxed()
}

/// Fetch one comment and recurse into its replies. Infallible: every failure
/// mode collapses into a placeholder so one bad branch cannot lose the rest
/// of the discussion.
async fn resolve_subtree(ctx: Arc<WalkCtx>, id: u64, depth: usize) -> CommentNode {
    if Instant::now() >= ctx.deadline {
        ctx.truncated.store(true, Ordering::Relaxed);
        tracing::warn!(id, depth, "build deadline expired, leaving placeholder");
        return CommentNode::placeholder(id, depth);
    }

    // The permit covers only the fetch itself; holding it across the child
    // recursion would deadlock once the tree is wider than the pool.
    let fetched = {
        let _permit = match ctx.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => return CommentNode::placeholder(id, depth),
        };
        fetch_with_retry(&ctx.api, id, ctx.limits.retry_attempts, ctx.limits.retry_delay).await
    };

    let item = match fetched {
        Ok(item) if item.dead => {
            tracing::debug!(id, "dead item, leaving placeholder");
            return CommentNode::placeholder(id, depth);
        }
        Ok(item) => item,
        Err(ApiError::NotFound(_)) => {
            tracing::debug!(id, "item not found, leaving placeholder");
            return CommentNode::placeholder(id, depth);
        }
        Err(err) => {
            tracing::warn!(id, %err, "comment fetch failed, leaving placeholder");
            return CommentNode::placeholder(id, depth);
        }
    };

    if item.item_kind() != ItemKind::Comment {
        tracing::debug!(id, kind = ?item.kind, "non-comment child, leaving placeholder");
        return CommentNode::placeholder(id, depth);
    }

    let children = if item.child_ids().is_empty() {
        Vec::new()
    } else if depth + 1 >= ctx.limits.max_depth {
        tracing::debug!(id, depth, "max depth reached, dropping replies");
        Vec::new()
    } else {
        resolve_children(ctx.clone(), item.child_ids().to_vec(), depth + 1).await
    };

    CommentNode {
        id: item.id,
        author: item.by.clone(),
        text: extract_text(item.text.as_deref().unwrap_or("")),
        age: format_relative(item.time, ctx.now),
        depth,
        children,
    }
}

/// Retry `Transient` failures up to the configured bound; every other outcome
/// is returned as-is.
async fn fetch_with_retry(
    api: &ApiService,
    id: u64,
    attempts: u32,
    delay: Duration,
) -> Result<RawItem, ApiError> {
    let mut remaining = attempts.max(1);
    loop {
        match api.fetch_item(id).await {
            Err(err @ ApiError::Transient { .. }) if remaining > 1 => {
                remaining -= 1;
                tracing::debug!(id, %err, "transient fetch failure, retrying");
                sleep(delay).await;
            }
            other => return other,
        }
    }
}
