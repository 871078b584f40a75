//! Inline `[url]` markup: tag scanning, link decomposition, re-serialization.

mod link;
mod tag;

pub use link::{LinkParseError, LinkParts};
pub(crate) use link::split_authority;
pub use tag::{annotated_tag, find_url_tags, replace_url_tags, simple_tag, UrlTag};
