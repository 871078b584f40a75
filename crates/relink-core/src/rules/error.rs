//! Errors raised while compiling the rule table.

use thiserror::Error;

/// A broken rule table. Always fatal: every later lookup would be suspect.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("regular expression '{pattern}' is invalid: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("path rule '{pattern}' names unknown transform '{name}'")]
    UnknownTransform { pattern: String, name: String },
    #[error("path rule '{pattern}' has neither a replacement nor a transform")]
    MissingReplacement { pattern: String },
    #[error("path rule '{pattern}' sets both a replacement and a transform")]
    AmbiguousReplacement { pattern: String },
}
