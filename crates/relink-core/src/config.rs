use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleaner::CleanerKind;

/// Default cap on a post body, matching the forum's own message limit.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 25_000;

/// One path rule under a host entry.
///
/// Exactly one of `replacement` (a substitution template) or `transform`
/// (a registered transform name) must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRuleConfig {
    /// Regex matched against `path[?query][#fragment]`.
    pub pattern: String,
    /// Substitution template; `$1` / `${name}` refer to capture groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Name of a transform from the registry (e.g. "strip_query").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// One host entry of the rule table. Entries are tried in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRuleConfig {
    /// Regex matched against the link's host.
    pub pattern: String,
    /// Rewrite `http://` to `https://` for links rewritten under this host.
    #[serde(default)]
    pub force_https: bool,
    #[serde(default)]
    pub paths: Vec<PathRuleConfig>,
}

/// Global configuration loaded from `~/.config/relink/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelinkConfig {
    /// Compute and log changes but never write them.
    #[serde(default)]
    pub pretend: bool,
    /// Write changes without touching the post's edit date.
    #[serde(default)]
    pub silent: bool,
    /// Cleaners applied to every post, in order.
    #[serde(default = "default_cleaners")]
    pub cleaners: Vec<CleanerKind>,
    /// Longest message (in characters) the post store accepts.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Forum database; defaults to `~/.local/state/relink/forum.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    /// Ordered rule table. First matching host wins.
    #[serde(default)]
    pub hosts: Vec<HostRuleConfig>,
}

fn default_cleaners() -> Vec<CleanerKind> {
    vec![CleanerKind::UrlMapper]
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

impl Default for RelinkConfig {
    fn default() -> Self {
        Self {
            pretend: false,
            silent: false,
            cleaners: default_cleaners(),
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            database: None,
            hosts: Vec::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("relink")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RelinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RelinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file. A missing file is an error here.
pub fn load_from_path(path: &Path) -> Result<RelinkConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: RelinkConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = RelinkConfig::default();
        assert!(!cfg.pretend);
        assert!(!cfg.silent);
        assert_eq!(cfg.cleaners, vec![CleanerKind::UrlMapper]);
        assert_eq!(cfg.max_message_length, 25_000);
        assert!(cfg.database.is_none());
        assert!(cfg.hosts.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = RelinkConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: RelinkConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.cleaners, cfg.cleaners);
        assert_eq!(parsed.max_message_length, cfg.max_message_length);
        assert_eq!(parsed.hosts, cfg.hosts);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: RelinkConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.cleaners, vec![CleanerKind::UrlMapper]);
        assert_eq!(cfg.max_message_length, DEFAULT_MAX_MESSAGE_LENGTH);
    }

    #[test]
    fn config_toml_rule_table_keeps_order() {
        let toml = r#"
            pretend = true
            cleaners = ["url_mapper", "dead_links"]

            [[hosts]]
            pattern = '^forum\.example\.com$'
            force_https = true

            [[hosts.paths]]
            pattern = '^/showthread\.php\?t=(\d+)$'
            replacement = '/threads/$1/'

            [[hosts.paths]]
            pattern = '^/Old/'
            transform = "lowercase_path"

            [[hosts]]
            pattern = 'example\.com$'
        "#;
        let cfg: RelinkConfig = toml::from_str(toml).unwrap();
        assert!(cfg.pretend);
        assert!(!cfg.silent);
        assert_eq!(
            cfg.cleaners,
            vec![CleanerKind::UrlMapper, CleanerKind::DeadLinks]
        );
        assert_eq!(cfg.hosts.len(), 2);

        let first = &cfg.hosts[0];
        assert_eq!(first.pattern, r"^forum\.example\.com$");
        assert!(first.force_https);
        assert_eq!(first.paths.len(), 2);
        assert_eq!(first.paths[0].replacement.as_deref(), Some("/threads/$1/"));
        assert!(first.paths[0].transform.is_none());
        assert_eq!(first.paths[1].transform.as_deref(), Some("lowercase_path"));

        let second = &cfg.hosts[1];
        assert!(!second.force_https);
        assert!(second.paths.is_empty());
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let err = load_from_path(Path::new("/nonexistent/relink/config.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("read config"));
    }
}
