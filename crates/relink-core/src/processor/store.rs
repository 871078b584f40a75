//! Post store seam used by the processor.

use anyhow::Result;
use async_trait::async_trait;

use crate::post_db::{Post, ThreadId};

/// Result of asking the store to persist a new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The store refused the change; one message per failed check.
    Rejected(Vec<String>),
}

/// Source of post sessions. One session spans one batch.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn PostSession + '_>>;
}

/// A unit of work over the post store.
///
/// Dropping a session without calling [`PostSession::commit`] discards
/// everything written through it.
#[async_trait]
pub trait PostSession: Send {
    /// Posts of one thread in the store's natural order.
    async fn posts_in_thread(&mut self, thread_id: ThreadId) -> Result<Vec<Post>>;

    /// Replace a post's message. Validation failures come back as
    /// `SaveOutcome::Rejected`; `Err` is reserved for store failures.
    async fn save_message(
        &mut self,
        post: &Post,
        message: &str,
        update_edit_date: bool,
    ) -> Result<SaveOutcome>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
