//! Forum post store (SQLite via sqlx).
//!
//! Holds post bodies per thread and implements the processor's
//! [`PostStore`](crate::processor::PostStore) seam: one sqlx transaction per
//! session, validated writes, optional edit-date bump.

pub mod db;
mod posts;
mod session;
pub mod types;
mod validate;

pub use db::PostDb;
pub use session::PostDbSession;
pub use types::*;
pub use validate::PostValidator;
