//! `relink rules` – print the compiled rule table.

use anyhow::Result;
use relink_core::config::RelinkConfig;
use relink_core::rules::{Replacement, RuleTable, TransformRegistry};

pub fn run_rules(cfg: &RelinkConfig) -> Result<()> {
    let table = RuleTable::compile(&cfg.hosts, &TransformRegistry::with_builtins())?;
    print!("{}", render_table(&table));
    Ok(())
}

fn render_table(table: &RuleTable) -> String {
    if table.is_empty() {
        return "No host rules configured.\n".to_string();
    }
    let mut out = String::new();
    for (i, host) in table.hosts().iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. host {}{}\n",
            i + 1,
            host.pattern().as_str(),
            if host.force_https() { "  [force https]" } else { "" }
        ));
        for (j, rule) in host.paths().iter().enumerate() {
            let target = match rule.replacement() {
                Replacement::Template(template) => template.clone(),
                Replacement::Transform(transform) => format!("<{}>", transform.name()),
            };
            out.push_str(&format!(
                "       {}. {} -> {}\n",
                j + 1,
                rule.pattern().as_str(),
                target
            ));
        }
    }
    out
}
