//! Batch content processor.
//!
//! Runs the cleaner chain over every post of every clean target inside one
//! store session (one transaction). Per-post save rejections are logged and
//! skipped; cleaner errors and store errors abort the batch, and the session
//! is dropped uncommitted, which rolls it back.

mod diff;
mod report;
mod store;

pub use diff::message_diff;
pub use report::{BatchReport, PostOutcome, PostReport};
pub use store::{PostSession, PostStore, SaveOutcome};

use anyhow::Result;

use crate::cleaner::{run_chain, Cleaner};
use crate::post_db::Post;
use crate::target::CleanTarget;

/// Operational modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOptions {
    /// Compute and log changes, never write them.
    pub pretend: bool,
    /// Write changes without updating the post's edit date.
    pub silent: bool,
}

pub struct ContentProcessor {
    cleaners: Vec<Box<dyn Cleaner>>,
    options: ProcessOptions,
}

impl ContentProcessor {
    pub fn new(cleaners: Vec<Box<dyn Cleaner>>, options: ProcessOptions) -> Self {
        Self { cleaners, options }
    }

    pub fn options(&self) -> ProcessOptions {
        self.options
    }

    /// Clean every post of every target, strictly in order, and commit once.
    pub async fn clean(
        &self,
        store: &dyn PostStore,
        targets: &[CleanTarget],
    ) -> Result<BatchReport> {
        let mut session = store.begin().await?;
        let mut report = BatchReport::default();

        for target in targets {
            let posts = session.posts_in_thread(target.id).await?;
            for post in posts {
                let outcome = self.process_post(session.as_mut(), &post, target).await?;
                report.push(PostReport {
                    thread_id: post.thread_id,
                    post_id: post.id,
                    outcome,
                });
            }
        }

        session.commit().await?;
        tracing::info!(
            targets = targets.len(),
            posts = report.visited(),
            changed = report.changed(),
            saved = report.saved(),
            rejected = report.rejected(),
            pretend = self.options.pretend,
            "clean batch committed"
        );
        Ok(report)
    }

    async fn process_post(
        &self,
        session: &mut (dyn PostSession + '_),
        post: &Post,
        target: &CleanTarget,
    ) -> Result<PostOutcome> {
        let message = run_chain(&self.cleaners, &post.message, &target.dead_links)?;

        if message == post.message {
            tracing::debug!(
                thread_id = post.thread_id,
                post_id = post.id,
                "No cleaning was required in thread {}, post {}",
                post.thread_id,
                post.id
            );
            return Ok(PostOutcome::Unchanged);
        }

        let diff = message_diff(&post.message, &message);
        tracing::info!(
            thread_id = post.thread_id,
            post_id = post.id,
            "BBCode cleaned in thread {}, post {}:\n{}",
            post.thread_id,
            post.id,
            diff
        );

        if self.options.pretend {
            return Ok(PostOutcome::Pretended { diff });
        }

        match session
            .save_message(post, &message, !self.options.silent)
            .await?
        {
            SaveOutcome::Saved => {
                tracing::debug!(post_id = post.id, "Saved post {} into DB", post.id);
                Ok(PostOutcome::Saved { diff })
            }
            SaveOutcome::Rejected(errors) => {
                tracing::error!(
                    post_id = post.id,
                    "Error saving post {}. Message is: '{}'. Errors are: {}",
                    post.id,
                    message,
                    errors.join("; ")
                );
                Ok(PostOutcome::Rejected { diff, errors })
            }
        }
    }
}
