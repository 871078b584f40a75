//! CLI command handlers, one per file.

mod clean;
mod preview;
mod rules;

pub use clean::run_clean;
pub use preview::run_preview;
pub use rules::run_rules;
