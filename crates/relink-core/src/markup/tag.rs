//! Scanning for the three accepted tag forms:
//!
//! - `[url="http://example.com"]Link text[/url]` (also `'`-quoted)
//! - `[url=http://example.com]Link text[/url]`
//! - `[url]http://www.example.com[/url]`

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    // Case-insensitive, `.` spans newlines, lazy body; group 1 = target, group 2 = body.
    static ref URL_TAG: Regex =
        Regex::new(r#"(?is)\[url(?:=["']?(.+?)?)?["']?\](.+?)\[/url\]"#)
            .expect("valid url tag regex");
}

/// One tag as it appears in the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTag<'a> {
    /// The whole tag, brackets included.
    pub raw: &'a str,
    /// Explicit target, or the body when the tag has none; trimmed.
    pub target: &'a str,
    /// Displayed text between the opening and closing tag.
    pub body: &'a str,
}

impl<'a> UrlTag<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        let raw = caps.get(0).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());
        let target = caps.get(1).map_or(body, |m| m.as_str()).trim();
        Self { raw, target, body }
    }

    /// Displayed text equals the target.
    pub fn is_simple(&self) -> bool {
        self.target == self.body.trim()
    }
}

/// All tags in `content`, in order, non-overlapping.
pub fn find_url_tags(content: &str) -> Vec<UrlTag<'_>> {
    URL_TAG
        .captures_iter(content)
        .map(|caps| UrlTag::from_captures(&caps))
        .collect()
}

/// Replace every tag in one pass over the original content; replaced output
/// is never rescanned. Borrows when no tag is present.
pub fn replace_url_tags<F>(content: &str, mut rewrite: F) -> Cow<'_, str>
where
    F: FnMut(&UrlTag<'_>) -> String,
{
    URL_TAG.replace_all(content, |caps: &Captures<'_>| {
        rewrite(&UrlTag::from_captures(caps))
    })
}

pub fn simple_tag(url: &str) -> String {
    format!("[url]{url}[/url]")
}

pub fn annotated_tag(url: &str, body: &str) -> String {
    format!("[url=\"{url}\"]{body}[/url]")
}
