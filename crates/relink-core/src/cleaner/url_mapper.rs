//! Rule-driven rewriting of `[url]` tags.

use std::borrow::Cow;
use std::sync::Arc;

use super::{CleanError, Cleaner};
use crate::markup::{annotated_tag, replace_url_tags, simple_tag, LinkParts, UrlTag};
use crate::rules::RuleTable;

/// Rewrites links on managed hosts according to a [`RuleTable`].
///
/// Tags are left byte-for-byte unchanged when the link does not parse, the
/// host is not managed, the link points at a bare domain, or no path rule
/// matches.
#[derive(Debug, Clone)]
pub struct UrlMapper {
    rules: Arc<RuleTable>,
}

impl UrlMapper {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// Rewrite every tag in `content` in a single pass.
    pub fn rewrite(&self, content: &str) -> String {
        replace_url_tags(content, |tag| self.rewrite_tag(tag)).into_owned()
    }

    fn rewrite_tag(&self, tag: &UrlTag<'_>) -> String {
        let parts = match LinkParts::parse(tag.target) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::error!(url = tag.target, "{}", e);
                return tag.raw.to_string();
            }
        };

        let Some(policy) = self.rules.find_host(&parts.host) else {
            return tag.raw.to_string();
        };

        // Links to the front page are never rewritten.
        if !parts.has_path() {
            return tag.raw.to_string();
        }

        let Some(rule) = policy.find_path(&parts.full_path()) else {
            return tag.raw.to_string();
        };

        let prefix = if policy.force_https() {
            force_https(parts.prefix)
        } else {
            Cow::Borrowed(parts.prefix)
        };
        let url = rule
            .replacement()
            .apply_to_url(rule.pattern(), &prefix, parts.suffix);

        if tag.is_simple() {
            simple_tag(&url)
        } else {
            let body = rule.replacement().apply_to_text(rule.pattern(), tag.body);
            annotated_tag(&url, &body)
        }
    }
}

impl Cleaner for UrlMapper {
    fn name(&self) -> &'static str {
        "url_mapper"
    }

    fn clean(&self, content: &str, _dead_links: &[String]) -> Result<String, CleanError> {
        Ok(self.rewrite(content))
    }
}

/// `http://` becomes `https://`; any other scheme is left alone.
fn force_https(prefix: &str) -> Cow<'_, str> {
    match prefix.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            Cow::Owned(format!("https://{}", &prefix[7..]))
        }
        _ => Cow::Borrowed(prefix),
    }
}
