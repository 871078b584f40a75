//! Host-scoped rewrite rules.
//!
//! A [`RuleTable`] is an ordered list of host policies, each holding an
//! ordered list of path rules. Lookups are first-match-wins at both levels;
//! there is no "most specific" ranking, so table order is the precedence.

mod error;
mod replacement;
mod table;

pub use error::RuleError;
pub use replacement::{Replacement, Transform, TransformRegistry};
pub use table::{HostPolicy, PathRule, RuleTable};

#[cfg(test)]
pub(crate) use replacement::shout;
