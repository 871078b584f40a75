//! CLI for relink.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use relink_core::config;
use std::path::PathBuf;

use commands::{run_clean, run_preview, run_rules};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "relink")]
#[command(about = "relink: rewrite stale [url] links in forum posts", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/relink/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rewrite links in every post of the given threads, in one transaction.
    Clean(CleanArgs),

    /// Run the configured cleaners over a file (or stdin) and print the result.
    Preview {
        /// File to read; stdin when omitted or "-".
        path: Option<PathBuf>,

        /// Dead link handed to the cleaners (repeatable).
        #[arg(long = "dead-link", value_name = "URL")]
        dead_links: Vec<String>,
    },

    /// Print the rule table in match order.
    Rules,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Thread to clean (repeatable).
    #[arg(long = "thread", value_name = "ID")]
    pub threads: Vec<i64>,

    /// Dead link applied to every --thread target (repeatable).
    #[arg(long = "dead-link", value_name = "URL")]
    pub dead_links: Vec<String>,

    /// TOML file listing [[targets]] with their own dead links.
    #[arg(long, value_name = "FILE")]
    pub targets: Option<PathBuf>,

    /// Log what would change, write nothing.
    #[arg(long)]
    pub pretend: bool,

    /// Write changes without bumping the posts' edit date.
    #[arg(long)]
    pub silent: bool,

    /// Forum database (overrides the config file).
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print the batch report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Clean(args) => run_clean(&cfg, &args).await?,
            CliCommand::Preview { path, dead_links } => {
                run_preview(&cfg, path.as_deref(), &dead_links).await?
            }
            CliCommand::Rules => run_rules(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
