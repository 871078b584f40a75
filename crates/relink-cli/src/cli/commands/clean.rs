//! `relink clean` – run one cleaning batch against the forum database.

use anyhow::{bail, Result};
use relink_core::cleaner::build_chain;
use relink_core::config::RelinkConfig;
use relink_core::post_db::{PostDb, PostValidator};
use relink_core::processor::{BatchReport, ContentProcessor, PostOutcome, ProcessOptions};
use relink_core::rules::TransformRegistry;
use relink_core::target::{load_targets, CleanTarget};

use crate::cli::CleanArgs;

pub async fn run_clean(cfg: &RelinkConfig, args: &CleanArgs) -> Result<()> {
    let targets = collect_targets(args)?;
    if targets.is_empty() {
        bail!("nothing to clean: pass --thread <ID> or --targets <FILE>");
    }

    // Compile rules before opening the database so a bad pattern never starts a transaction.
    let chain = build_chain(&cfg.cleaners, &cfg.hosts, &TransformRegistry::with_builtins())?;
    let options = ProcessOptions {
        pretend: args.pretend || cfg.pretend,
        silent: args.silent || cfg.silent,
    };

    let db = match args.db.as_ref().or(cfg.database.as_ref()) {
        Some(path) => PostDb::open_at(path).await?,
        None => PostDb::open_default().await?,
    }
    .with_validator(PostValidator::new(cfg.max_message_length));

    tracing::info!(
        targets = targets.len(),
        pretend = options.pretend,
        silent = options.silent,
        "starting clean batch"
    );
    let report = ContentProcessor::new(chain, options)
        .clean(&db, &targets)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, options.pretend);
    }
    Ok(())
}

/// Targets from --targets first, then one per --thread sharing the --dead-link list.
fn collect_targets(args: &CleanArgs) -> Result<Vec<CleanTarget>> {
    let mut targets = match &args.targets {
        Some(path) => load_targets(path)?,
        None => Vec::new(),
    };
    targets.extend(
        args.threads
            .iter()
            .map(|&id| CleanTarget::new(id, args.dead_links.clone())),
    );
    Ok(targets)
}

fn print_report(report: &BatchReport, pretend: bool) {
    for post in &report.posts {
        let status = match &post.outcome {
            PostOutcome::Unchanged => continue,
            PostOutcome::Pretended { .. } => "would change".to_string(),
            PostOutcome::Saved { .. } => "saved".to_string(),
            PostOutcome::Rejected { errors, .. } => format!("rejected: {}", errors.join("; ")),
        };
        println!("thread {} post {}: {}", post.thread_id, post.post_id, status);
        if let Some(diff) = post.outcome.diff() {
            for line in diff.lines() {
                println!("    {line}");
            }
        }
    }
    println!(
        "{} post(s) visited, {} changed, {} saved, {} rejected{}",
        report.visited(),
        report.changed(),
        report.saved(),
        report.rejected(),
        if pretend { " (pretend: nothing written)" } else { "" }
    );
}
