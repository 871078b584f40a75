//! Content cleaners.
//!
//! Every cleaner shares one capability, `clean(content, dead_links) -> content`,
//! and the processor runs them as a chain in configured order, each consuming
//! the previous one's output.

mod dead_links;
mod url_mapper;

pub use dead_links::DeadLinkCleaner;
pub use url_mapper::UrlMapper;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::HostRuleConfig;
use crate::rules::{RuleError, RuleTable, TransformRegistry};

/// A cleaner failure. Never recovered per post: it aborts the whole batch.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error(transparent)]
    Rules(#[from] RuleError),
    #[error("{cleaner} cleaner failed: {message}")]
    Failed {
        cleaner: &'static str,
        message: String,
    },
}

/// One content-cleaning pass over a post body.
pub trait Cleaner: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return the cleaned content. `dead_links` are the clean target's known
    /// dead link strings; cleaners that work from rules alone ignore them.
    fn clean(&self, content: &str, dead_links: &[String]) -> Result<String, CleanError>;
}

/// Cleaner variants selectable from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanerKind {
    /// Rewrite links through the host/path rule table.
    UrlMapper,
    /// Unlink tags that point at one of the target's dead links.
    DeadLinks,
}

/// Build the cleaner chain in `kinds` order. The rule table is compiled once
/// and shared; an invalid pattern fails here, before any post is touched.
pub fn build_chain(
    kinds: &[CleanerKind],
    hosts: &[HostRuleConfig],
    transforms: &TransformRegistry,
) -> Result<Vec<Box<dyn Cleaner>>, CleanError> {
    let rules = Arc::new(RuleTable::compile(hosts, transforms)?);
    let chain = kinds
        .iter()
        .map(|kind| -> Box<dyn Cleaner> {
            match kind {
                CleanerKind::UrlMapper => Box::new(UrlMapper::new(Arc::clone(&rules))),
                CleanerKind::DeadLinks => Box::new(DeadLinkCleaner::new()),
            }
        })
        .collect();
    Ok(chain)
}

/// Run a chain over one message.
pub fn run_chain(
    chain: &[Box<dyn Cleaner>],
    content: &str,
    dead_links: &[String],
) -> Result<String, CleanError> {
    let mut message = content.to_string();
    for cleaner in chain {
        message = cleaner.clean(&message, dead_links)?;
    }
    Ok(message)
}
