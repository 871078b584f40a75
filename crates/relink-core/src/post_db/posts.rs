//! Post reads and inserts outside of a clean session.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::db::{unix_timestamp, PostDb};
use super::types::{Post, PostId, ThreadId};

pub(super) const POST_COLUMNS: &str =
    "post_id, thread_id, position, message, post_date, last_edit_date, edit_count";

pub(super) fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        id: row.get("post_id"),
        thread_id: row.get("thread_id"),
        position: row.get("position"),
        message: row.get("message"),
        post_date: row.get("post_date"),
        last_edit_date: row.get("last_edit_date"),
        edit_count: row.get("edit_count"),
    }
}

/// Posts of one thread by position, then id.
pub(super) async fn fetch_thread(
    conn: &mut SqliteConnection,
    thread_id: ThreadId,
) -> Result<Vec<Post>> {
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE thread_id = ?1 ORDER BY position ASC, post_id ASC"
    );
    let rows = sqlx::query(&sql).bind(thread_id).fetch_all(conn).await?;
    Ok(rows.iter().map(post_from_row).collect())
}

impl PostDb {
    /// Append a post to the end of a thread.
    pub async fn add_post(&self, thread_id: ThreadId, message: &str) -> Result<PostId> {
        let now = unix_timestamp();
        let row_id = sqlx::query(
            r#"
            INSERT INTO posts (thread_id, position, message, post_date)
            VALUES (
                ?1,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM posts WHERE thread_id = ?1),
                ?2,
                ?3
            )
            "#,
        )
        .bind(thread_id)
        .bind(message)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(row_id)
    }

    /// Fetch a single post.
    pub async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = ?1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(post_from_row))
    }

    /// Posts of one thread, outside any session.
    pub async fn list_thread(&self, thread_id: ThreadId) -> Result<Vec<Post>> {
        let mut conn = self.pool.acquire().await?;
        fetch_thread(&mut conn, thread_id).await
    }
}
