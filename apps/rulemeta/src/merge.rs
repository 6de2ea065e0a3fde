//! Cross-package merge into the unnamespaced default package.

use crate::config::Settings;
use crate::models::{PackageInfo, RuleInfo};
use std::collections::HashSet;

/// Merge sources by `shortId`, highest precedence first: the primary
/// convention, then the typed convention, then the JSX convention. When
/// several sources define a rule, the earliest one here supplies its
/// metadata.
pub const MERGE_PRECEDENCE: [&str; 3] = ["js", "ts", "jsx"];

/// Union the rules of `sources` (looked up by shortId, in order) into the
/// merged package.
///
/// Names keep first-encounter order across the precedence list. Each merged
/// rule is the earliest source's record with its id moved into `namespace`
/// and `originalId` cleared.
pub fn merge_packages(packages: &[PackageInfo], settings: &Settings) -> PackageInfo {
    let namespace = &settings.namespace;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rules: Vec<RuleInfo> = Vec::new();

    for short_id in &settings.merge_sources {
        let Some(pkg) = packages.iter().find(|p| &p.short_id == short_id) else {
            tracing::warn!(source = %short_id, "merge source package not found, skipping");
            continue;
        };
        for rule in &pkg.rules {
            if !seen.insert(rule.name.as_str()) {
                continue;
            }
            rules.push(RuleInfo {
                rule_id: format!("{}/{}", namespace, rule.name),
                original_id: None,
                ..rule.clone()
            });
        }
    }

    PackageInfo {
        name: format!("{}/eslint-plugin", namespace),
        short_id: settings.merged_short_id.clone(),
        pkg_id: namespace.clone(),
        path: "packages/eslint-plugin".to_string(),
        rules,
    }
}
