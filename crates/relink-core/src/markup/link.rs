//! Link decomposition into host, path, query and fragment.
//!
//! The URL is validated by `url::Url`, but host, path, query and fragment are
//! sliced from the text as written: `Url` reports `/` for the path of
//! `http://h`, which would hide the bare-domain case, and punycodes
//! internationalized hosts, which Unicode host patterns would never match.

use thiserror::Error;
use url::Url;

/// A link target that is not an absolute http(s) URL.
#[derive(Debug, Error)]
pub enum LinkParseError {
    #[error("unable to parse link '{url}': {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unable to parse link '{url}': unsupported scheme '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },
}

impl LinkParseError {
    pub fn url(&self) -> &str {
        match self {
            LinkParseError::Invalid { url, .. } | LinkParseError::UnsupportedScheme { url, .. } => {
                url
            }
        }
    }
}

/// A parsed link, borrowing from the tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts<'a> {
    /// Host as written, lowercased, without userinfo or port.
    pub host: String,
    /// `scheme://authority` as written.
    pub prefix: &'a str,
    /// Everything after the authority as written.
    pub suffix: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> LinkParts<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, LinkParseError> {
        let raw = raw.trim();
        let parsed = Url::parse(raw).map_err(|source| LinkParseError::Invalid {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LinkParseError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }

        let (prefix, suffix) = split_authority(raw);
        let host = written_host(prefix).to_lowercase();
        let (before_fragment, fragment) = match suffix.find('#') {
            Some(i) => (&suffix[..i], &suffix[i + 1..]),
            None => (suffix, ""),
        };
        let (path, query) = match before_fragment.find('?') {
            Some(i) => (&before_fragment[..i], &before_fragment[i + 1..]),
            None => (before_fragment, ""),
        };

        Ok(Self {
            host,
            prefix,
            suffix,
            path,
            query,
            fragment,
        })
    }

    /// `http://h` has no path; `http://h/` does.
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Path plus `?query` and `#fragment` when those are non-empty.
    pub fn full_path(&self) -> String {
        let mut out = String::with_capacity(self.suffix.len());
        out.push_str(self.path);
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(self.fragment);
        }
        out
    }
}

/// Split `scheme://authority/rest` into `("scheme://authority", "/rest")`.
/// Without `://` the whole input is the prefix.
pub(crate) fn split_authority(url: &str) -> (&str, &str) {
    let Some(scheme_end) = url.find("://") else {
        return (url, "");
    };
    let authority_start = scheme_end + 3;
    let authority_len = url[authority_start..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - authority_start);
    url.split_at(authority_start + authority_len)
}

/// Host part of `scheme://userinfo@host:port`.
fn written_host(prefix: &str) -> &str {
    let authority = prefix.split_once("://").map_or("", |(_, rest)| rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, rest)| rest);
    if host_port.starts_with('[') {
        // IPv6 literal keeps its brackets, as `Url::host_str` does.
        return host_port.find(']').map_or(host_port, |end| &host_port[..=end]);
    }
    host_port.split(':').next().unwrap_or_default()
}
