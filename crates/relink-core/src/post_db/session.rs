//! Transactional clean session over the post database.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

use super::db::{unix_timestamp, PostDb};
use super::posts::fetch_thread;
use super::types::{Post, ThreadId};
use super::validate::PostValidator;
use crate::processor::{PostSession, PostStore, SaveOutcome};

/// One open transaction. Dropped without `commit`, sqlx rolls it back.
pub struct PostDbSession {
    tx: Transaction<'static, Sqlite>,
    validator: PostValidator,
}

#[async_trait]
impl PostStore for PostDb {
    async fn begin(&self) -> Result<Box<dyn PostSession + '_>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostDbSession {
            tx,
            validator: self.validator,
        }))
    }
}

#[async_trait]
impl PostSession for PostDbSession {
    async fn posts_in_thread(&mut self, thread_id: ThreadId) -> Result<Vec<Post>> {
        fetch_thread(&mut self.tx, thread_id).await
    }

    async fn save_message(
        &mut self,
        post: &Post,
        message: &str,
        update_edit_date: bool,
    ) -> Result<SaveOutcome> {
        let errors = self.validator.validate(message);
        if !errors.is_empty() {
            return Ok(SaveOutcome::Rejected(errors));
        }

        let result = if update_edit_date {
            sqlx::query(
                r#"
                UPDATE posts
                SET message = ?1,
                    last_edit_date = ?2,
                    edit_count = edit_count + 1
                WHERE post_id = ?3
                "#,
            )
            .bind(message)
            .bind(unix_timestamp())
            .bind(post.id)
            .execute(&mut *self.tx)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE posts
                SET message = ?1
                WHERE post_id = ?2
                "#,
            )
            .bind(message)
            .bind(post.id)
            .execute(&mut *self.tx)
            .await?
        };

        if result.rows_affected() == 0 {
            return Ok(SaveOutcome::Rejected(vec![format!(
                "Post {} no longer exists.",
                post.id
            )]));
        }
        Ok(SaveOutcome::Saved)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let session = *self;
        session.tx.commit().await?;
        Ok(())
    }
}
