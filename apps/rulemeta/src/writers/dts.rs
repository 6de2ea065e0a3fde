//! Type declaration writers.
//!
//! `rule-options.d.ts` holds two interfaces over the same rule list: one
//! keyed by namespaced rule id and one keyed by bare name. They are built by
//! two independent projections, [`keyed_by_id`] and [`keyed_by_name`].

use crate::models::{PackageInfo, RuleInfo};
use crate::schema::RuleTypes;
use crate::utils::{doc_text, pascal_case, ts_string, GENERATED_BANNER};

/// Canonical documentation URL of a rule.
pub fn docs_url(docs_base: &str, short_id: &str, name: &str) -> String {
    format!("{}/{}/{}", docs_base, short_id, name)
}

fn options_alias(rule: &RuleInfo) -> String {
    format!("{}RuleOptions", pascal_case(&rule.name))
}

fn interface_entry(rule: &RuleInfo, key: &str, url: &str) -> String {
    let mut lines = vec!["  /**".to_string()];
    if let Some(desc) = rule.description() {
        for line in doc_text(desc).lines() {
            lines.push(format!("   * {}", line).trim_end().to_string());
        }
    }
    lines.push(format!("   * @see {}", url));
    lines.push("   */".to_string());
    lines.push(format!("  {}: {}", ts_string(key), options_alias(rule)));
    lines.join("\n")
}

/// Interface entries keyed by `ruleId`.
pub fn keyed_by_id(pkg: &PackageInfo, docs_base: &str) -> Vec<String> {
    pkg.rules
        .iter()
        .map(|r| interface_entry(r, &r.rule_id, &docs_url(docs_base, &pkg.short_id, &r.name)))
        .collect()
}

/// Interface entries keyed by bare rule name.
pub fn keyed_by_name(pkg: &PackageInfo, docs_base: &str) -> Vec<String> {
    pkg.rules
        .iter()
        .map(|r| interface_entry(r, &r.name, &docs_url(docs_base, &pkg.short_id, &r.name)))
        .collect()
}

fn interface(name: &str, entries: &[String]) -> String {
    format!("export interface {} {{\n{}\n}}", name, entries.join("\n"))
}

/// Render `dts/rule-options.d.ts`.
pub fn render_rule_options(pkg: &PackageInfo, docs_base: &str) -> String {
    let imports: Vec<String> = pkg
        .rules
        .iter()
        .map(|r| {
            format!(
                "import type {{ RuleOptions as {} }} from {}",
                options_alias(r),
                ts_string(&format!("../rules/{}/types", r.name))
            )
        })
        .collect();
    [
        GENERATED_BANNER.to_string(),
        imports.join("\n"),
        interface("RuleOptions", &keyed_by_id(pkg, docs_base)),
        interface("UnprefixedRuleOptions", &keyed_by_name(pkg, docs_base)),
    ]
    .join("\n\n")
        + "\n"
}

/// Render `dts/define-config-support.d.ts`, augmenting `interface` of the
/// external `module` with this package's `RuleOptions`.
pub fn render_define_config_support(module: &str, interface: &str) -> String {
    format!(
        "{}\n\nimport type {{ RuleOptions }} from './rule-options'\n\n\
         declare module {} {{\n  export interface {} extends RuleOptions {{}}\n}}\n",
        GENERATED_BANNER,
        ts_string(module),
        interface
    )
}

/// Render `rules/<name>/types.d.ts`.
pub fn render_rule_types(types: &RuleTypes) -> String {
    let mut blocks = vec![GENERATED_BANNER.to_string()];
    blocks.extend(types.declarations.iter().cloned());
    blocks.push(format!(
        "export type RuleOptions = {}\nexport type MessageIds = {}",
        types.options, types.message_ids
    ));
    blocks.join("\n\n") + "\n"
}
