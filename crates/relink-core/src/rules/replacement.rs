//! Template-or-transform replacements for path rules.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::markup::split_authority;

type TransformFn = dyn Fn(&str, &Regex) -> String + Send + Sync;

/// A named callable that rewrites a whole URL, given the path pattern that selected it.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str, &Regex) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, url: &str, pattern: &Regex) -> String {
        (self.func)(url, pattern)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("name", &self.name).finish()
    }
}

/// What a matched path rule does to the link.
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Regex substitution template (`$1`, `${name}`).
    Template(String),
    Transform(Transform),
}

impl Replacement {
    /// Rewrite a link split into `scheme://authority` and the rest.
    ///
    /// Templates substitute within `suffix` only so host and scheme survive;
    /// transforms see the whole URL.
    pub(crate) fn apply_to_url(&self, pattern: &Regex, prefix: &str, suffix: &str) -> String {
        match self {
            Replacement::Template(template) => {
                format!("{prefix}{}", pattern.replace_all(suffix, template.as_str()))
            }
            Replacement::Transform(transform) => {
                transform.call(&format!("{prefix}{suffix}"), pattern)
            }
        }
    }

    /// Rewrite free text (an annotated link's body). Text the pattern does not
    /// match comes back unchanged.
    pub(crate) fn apply_to_text(&self, pattern: &Regex, text: &str) -> String {
        match self {
            Replacement::Template(template) => {
                pattern.replace_all(text, template.as_str()).into_owned()
            }
            Replacement::Transform(transform) if pattern.is_match(text) => {
                transform.call(text, pattern)
            }
            Replacement::Transform(_) => text.to_string(),
        }
    }
}

/// Transforms addressable by name from the config file.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
}

impl TransformRegistry {
    /// Empty registry; see [`TransformRegistry::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `lowercase_path` and `strip_query`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("lowercase_path", lowercase_path);
        registry.register("strip_query", strip_query);
        registry
    }

    /// Add or replace a transform.
    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&str, &Regex) -> String + Send + Sync + 'static,
    {
        self.transforms
            .insert(name.to_string(), Transform::new(name, func));
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }
}

/// Lowercase the path of a link, leaving query and fragment as written.
fn lowercase_path(url: &str, _pattern: &Regex) -> String {
    let (prefix, suffix) = split_authority(url);
    let end = suffix.find(['?', '#']).unwrap_or(suffix.len());
    format!("{prefix}{}{}", suffix[..end].to_lowercase(), &suffix[end..])
}

/// Drop the query string, keeping any fragment.
fn strip_query(url: &str, _pattern: &Regex) -> String {
    let (head, fragment) = url.split_at(url.find('#').unwrap_or(url.len()));
    match head.find('?') {
        Some(i) => format!("{}{}", &head[..i], fragment),
        None => url.to_string(),
    }
}

/// Uppercases every span the pattern matches. Only used to exercise custom
/// registration in tests.
#[cfg(test)]
pub(crate) fn shout(url: &str, pattern: &Regex) -> String {
    pattern
        .replace_all(url, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}
