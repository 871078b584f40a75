//! Clean targets: which threads to process and their known dead links.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::post_db::ThreadId;

/// One unit of work: a thread plus the dead link strings relevant to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanTarget {
    pub id: ThreadId,
    #[serde(default)]
    pub dead_links: Vec<String>,
}

impl CleanTarget {
    pub fn new(id: ThreadId, dead_links: Vec<String>) -> Self {
        Self { id, dead_links }
    }
}

#[derive(Debug, Deserialize)]
struct TargetFile {
    #[serde(default)]
    targets: Vec<CleanTarget>,
}

/// Parse a targets file:
///
/// ```toml
/// [[targets]]
/// id = 42
/// dead_links = ["http://gone.example.com/page"]
/// ```
pub fn parse_targets(data: &str) -> Result<Vec<CleanTarget>> {
    let file: TargetFile = toml::from_str(data)?;
    Ok(file.targets)
}

pub fn load_targets(path: &Path) -> Result<Vec<CleanTarget>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read targets: {}", path.display()))?;
    parse_targets(&data).with_context(|| format!("parse targets: {}", path.display()))
}
