//! Types used by the post store.

use serde::Serialize;

/// Thread identifier.
pub type ThreadId = i64;

/// Post identifier.
pub type PostId = i64;

/// One post as stored. The processor only rewrites `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub thread_id: ThreadId,
    /// Order within the thread.
    pub position: i64,
    pub message: String,
    pub post_date: i64,
    /// Unix seconds of the last visible edit; 0 if never edited.
    pub last_edit_date: i64,
    pub edit_count: i64,
}

impl Post {
    /// A never-edited post at position 0.
    pub fn new(id: PostId, thread_id: ThreadId, message: impl Into<String>) -> Self {
        Self {
            id,
            thread_id,
            position: 0,
            message: message.into(),
            post_date: 0,
            last_edit_date: 0,
            edit_count: 0,
        }
    }
}
