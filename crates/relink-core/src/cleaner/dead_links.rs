//! Unlinking of known-dead links.

use super::{CleanError, Cleaner};
use crate::markup::replace_url_tags;

/// Replaces each `[url]` tag whose target is one of the clean target's dead
/// links with the tag's displayed text. For a simple link that is the URL
/// itself, now as plain text.
#[derive(Debug, Clone, Default)]
pub struct DeadLinkCleaner;

impl DeadLinkCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Cleaner for DeadLinkCleaner {
    fn name(&self) -> &'static str {
        "dead_links"
    }

    fn clean(&self, content: &str, dead_links: &[String]) -> Result<String, CleanError> {
        if dead_links.is_empty() {
            return Ok(content.to_string());
        }
        let cleaned = replace_url_tags(content, |tag| {
            if dead_links.iter().any(|dead| dead.trim() == tag.target) {
                tracing::debug!(url = tag.target, "unlinking dead link");
                tag.body.to_string()
            } else {
                tag.raw.to_string()
            }
        });
        Ok(cleaned.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead(links: &[&str]) -> Vec<String> {
        links.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unlinks_only_listed_targets() {
        let content = "[url=\"http://gone.example/a\"]old article[/url] and [url]http://live.example/b[/url]";
        let out = DeadLinkCleaner::new()
            .clean(content, &dead(&["http://gone.example/a"]))
            .unwrap();
        assert_eq!(out, "old article and [url]http://live.example/b[/url]");
    }

    #[test]
    fn simple_dead_link_keeps_url_text() {
        let out = DeadLinkCleaner::new()
            .clean("see [url]http://gone.example/x[/url]", &dead(&[" http://gone.example/x "]))
            .unwrap();
        assert_eq!(out, "see http://gone.example/x");
    }

    #[test]
    fn no_dead_links_is_identity() {
        let content = "[url]http://gone.example/x[/url]";
        assert_eq!(DeadLinkCleaner::new().clean(content, &[]).unwrap(), content);
    }
}
