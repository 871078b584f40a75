//! `relink preview [FILE]` – show what the cleaners would make of some content.

use anyhow::{Context, Result};
use relink_core::cleaner::{build_chain, run_chain};
use relink_core::config::RelinkConfig;
use relink_core::rules::TransformRegistry;
use std::path::Path;
use tokio::io::AsyncReadExt;

pub async fn run_preview(
    cfg: &RelinkConfig,
    path: Option<&Path>,
    dead_links: &[String],
) -> Result<()> {
    let content = match path {
        Some(p) if p != Path::new("-") => tokio::fs::read_to_string(p)
            .await
            .with_context(|| format!("read {}", p.display()))?,
        _ => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("read stdin")?;
            buf
        }
    };

    let chain = build_chain(&cfg.cleaners, &cfg.hosts, &TransformRegistry::with_builtins())?;
    let cleaned = run_chain(&chain, &content, dead_links)?;
    if cleaned == content {
        tracing::debug!("preview: no changes");
    }
    print!("{cleaned}");
    Ok(())
}
