//! Per-post outcomes of one batch.

use serde::Serialize;

use crate::post_db::{PostId, ThreadId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostOutcome {
    /// The cleaners left the message as it was.
    Unchanged,
    /// Changed, but pretend mode kept it from being written.
    Pretended { diff: String },
    Saved { diff: String },
    /// The store refused the change; the batch went on without it.
    Rejected { diff: String, errors: Vec<String> },
}

impl PostOutcome {
    pub fn diff(&self) -> Option<&str> {
        match self {
            PostOutcome::Unchanged => None,
            PostOutcome::Pretended { diff }
            | PostOutcome::Saved { diff }
            | PostOutcome::Rejected { diff, .. } => Some(diff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostReport {
    pub thread_id: ThreadId,
    pub post_id: PostId,
    pub outcome: PostOutcome,
}

/// Every post visited, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub posts: Vec<PostReport>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, post: PostReport) {
        self.posts.push(post);
    }

    pub fn visited(&self) -> usize {
        self.posts.len()
    }

    pub fn changed(&self) -> usize {
        self.posts.iter().filter(|p| p.outcome.diff().is_some()).count()
    }

    pub fn saved(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Saved { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Rejected { .. }))
    }

    /// `(post, diff)` for every changed post.
    pub fn diffs(&self) -> Vec<(PostId, &str)> {
        self.posts
            .iter()
            .filter_map(|p| p.outcome.diff().map(|d| (p.post_id, d)))
            .collect()
    }

    fn count(&self, pred: impl Fn(&PostOutcome) -> bool) -> usize {
        self.posts.iter().filter(|p| pred(&p.outcome)).count()
    }
}
