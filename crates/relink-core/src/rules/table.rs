//! Compiled, ordered rule table.

use regex::Regex;

use super::error::RuleError;
use super::replacement::{Replacement, TransformRegistry};
use crate::config::{HostRuleConfig, PathRuleConfig};

/// One compiled path rule.
#[derive(Debug, Clone)]
pub struct PathRule {
    pattern: Regex,
    replacement: Replacement,
}

impl PathRule {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }
}

/// Rewrite policy for every host its pattern matches.
#[derive(Debug, Clone)]
pub struct HostPolicy {
    pattern: Regex,
    force_https: bool,
    paths: Vec<PathRule>,
}

impl HostPolicy {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn force_https(&self) -> bool {
        self.force_https
    }

    pub fn paths(&self) -> &[PathRule] {
        &self.paths
    }

    /// First path rule (in table order) matching `path[?query][#fragment]`.
    pub fn find_path(&self, full_path: &str) -> Option<&PathRule> {
        self.paths.iter().find(|rule| rule.pattern.is_match(full_path))
    }
}

/// Ordered host policies. Read-only once compiled.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    hosts: Vec<HostPolicy>,
}

impl RuleTable {
    /// Compile every host and path pattern, preserving config order.
    ///
    /// The first invalid pattern is logged and returned; nothing is partially built.
    pub fn compile(
        hosts: &[HostRuleConfig],
        transforms: &TransformRegistry,
    ) -> Result<Self, RuleError> {
        let hosts = hosts
            .iter()
            .map(|host| compile_host(host, transforms))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(hosts = hosts.len(), "compiled rule table");
        Ok(Self { hosts })
    }

    pub fn hosts(&self) -> &[HostPolicy] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// First host policy (in table order) whose pattern matches `host`.
    pub fn find_host(&self, host: &str) -> Option<&HostPolicy> {
        self.hosts.iter().find(|policy| policy.pattern.is_match(host))
    }
}

fn compile_host(
    host: &HostRuleConfig,
    transforms: &TransformRegistry,
) -> Result<HostPolicy, RuleError> {
    let pattern = compile_pattern(&host.pattern)?;
    let paths = host
        .paths
        .iter()
        .map(|path| compile_path(path, transforms))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HostPolicy {
        pattern,
        force_https: host.force_https,
        paths,
    })
}

fn compile_path(
    path: &PathRuleConfig,
    transforms: &TransformRegistry,
) -> Result<PathRule, RuleError> {
    let pattern = compile_pattern(&path.pattern)?;
    let replacement = match (&path.replacement, &path.transform) {
        (Some(template), None) => Replacement::Template(template.clone()),
        (None, Some(name)) => {
            let transform = transforms
                .get(name)
                .ok_or_else(|| RuleError::UnknownTransform {
                    pattern: path.pattern.clone(),
                    name: name.clone(),
                })?;
            Replacement::Transform(transform.clone())
        }
        (None, None) => {
            return Err(RuleError::MissingReplacement {
                pattern: path.pattern.clone(),
            })
        }
        (Some(_), Some(_)) => {
            return Err(RuleError::AmbiguousReplacement {
                pattern: path.pattern.clone(),
            })
        }
    };
    Ok(PathRule {
        pattern,
        replacement,
    })
}

fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| {
        tracing::error!(pattern, "regular expression '{}' is invalid", pattern);
        RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(pattern: &str, replacement: &str) -> PathRuleConfig {
        PathRuleConfig {
            pattern: pattern.to_string(),
            replacement: Some(replacement.to_string()),
            transform: None,
        }
    }

    fn host(pattern: &str, paths: Vec<PathRuleConfig>) -> HostRuleConfig {
        HostRuleConfig {
            pattern: pattern.to_string(),
            force_https: false,
            paths,
        }
    }

    #[test]
    fn first_matching_host_wins() {
        let table = RuleTable::compile(
            &[
                host(r"^www\.example\.com$", vec![path("^/a", "/first")]),
                host(r"example\.com$", vec![path("^/a", "/second")]),
            ],
            &TransformRegistry::new(),
        )
        .unwrap();

        let policy = table.find_host("www.example.com").unwrap();
        assert!(policy.pattern().is_match("www.example.com"));
        match policy.find_path("/a").unwrap().replacement() {
            Replacement::Template(t) => assert_eq!(t, "/first"),
            other => panic!("unexpected replacement {other:?}"),
        }

        let policy = table.find_host("cdn.example.com").unwrap();
        match policy.find_path("/a").unwrap().replacement() {
            Replacement::Template(t) => assert_eq!(t, "/second"),
            other => panic!("unexpected replacement {other:?}"),
        }

        assert!(table.find_host("example.org").is_none());
    }

    #[test]
    fn first_matching_path_wins() {
        let table = RuleTable::compile(
            &[host(
                "example",
                vec![path(r"^/t/\d+", "/one"), path(r"^/t/", "/two")],
            )],
            &TransformRegistry::new(),
        )
        .unwrap();
        let policy = table.find_host("example").unwrap();
        assert_eq!(policy.find_path("/t/5").unwrap().pattern().as_str(), r"^/t/\d+");
        assert_eq!(policy.find_path("/t/x").unwrap().pattern().as_str(), r"^/t/");
        assert!(policy.find_path("/u").is_none());
    }

    #[test]
    fn invalid_host_pattern_is_reported() {
        let err = RuleTable::compile(&[host("(unclosed", vec![])], &TransformRegistry::new())
            .unwrap_err();
        match err {
            RuleError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_path_pattern_is_reported() {
        let err = RuleTable::compile(
            &[host("ok", vec![path("^/fine", "/x"), path("[z-a]", "/y")])],
            &TransformRegistry::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("'[z-a]' is invalid"));
    }

    #[test]
    fn transform_names_resolve_through_registry() {
        let rule = PathRuleConfig {
            pattern: "^/".to_string(),
            replacement: None,
            transform: Some("strip_query".to_string()),
        };
        let table = RuleTable::compile(
            &[host("h", vec![rule.clone()])],
            &TransformRegistry::with_builtins(),
        )
        .unwrap();
        match table.hosts()[0].paths()[0].replacement() {
            Replacement::Transform(t) => assert_eq!(t.name(), "strip_query"),
            other => panic!("unexpected replacement {other:?}"),
        }

        let err = RuleTable::compile(&[host("h", vec![rule])], &TransformRegistry::new())
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownTransform { .. }));
    }

    #[test]
    fn replacement_must_be_exactly_one_kind() {
        let neither = PathRuleConfig {
            pattern: "^/".to_string(),
            replacement: None,
            transform: None,
        };
        let err = RuleTable::compile(&[host("h", vec![neither])], &TransformRegistry::new())
            .unwrap_err();
        assert!(matches!(err, RuleError::MissingReplacement { .. }));

        let both = PathRuleConfig {
            pattern: "^/".to_string(),
            replacement: Some("/x".to_string()),
            transform: Some("strip_query".to_string()),
        };
        let err = RuleTable::compile(
            &[host("h", vec![both])],
            &TransformRegistry::with_builtins(),
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::AmbiguousReplacement { .. }));
    }
}
