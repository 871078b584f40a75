//! SQLite-backed post database.
//!
//! Handles connection, migrations, and timestamp helpers. Post reads and
//! writes live in `posts` and `session`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::validate::PostValidator;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite forum database.
///
/// Unless configured otherwise the file lives under the XDG state directory:
/// `~/.local/state/relink/forum.db`.
#[derive(Clone)]
pub struct PostDb {
    pub(crate) pool: Pool<Sqlite>,
    pub(crate) validator: PostValidator,
}

impl PostDb {
    /// Open (or create) the default database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("relink")?;
        let db_path = xdg_dirs.get_state_home().join("forum.db");
        Self::open_at(db_path).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = PostDb {
            pool,
            validator: PostValidator::default(),
        };
        db.migrate().await?;
        Ok(db)
    }

    /// Replace the checks applied to every saved message.
    pub fn with_validator(mut self, validator: PostValidator) -> Self {
        self.validator = validator;
        self
    }

    async fn migrate(&self) -> Result<()> {
        // `position` orders posts within a thread; `last_edit_date` and
        // `edit_count` only move on visible (non-silent) edits.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                post_id INTEGER PRIMARY KEY AUTOINCREMENT,
                thread_id INTEGER NOT NULL,
                position INTEGER NOT NULL DEFAULT 0,
                message TEXT NOT NULL,
                post_date INTEGER NOT NULL,
                last_edit_date INTEGER NOT NULL DEFAULT 0,
                edit_count INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS posts_thread_position
            ON posts (thread_id, position);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<PostDb> {
    // Single connection so the pool never hands back a different, empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = PostDb {
        pool,
        validator: PostValidator::default(),
    };
    db.migrate().await?;
    Ok(db)
}
