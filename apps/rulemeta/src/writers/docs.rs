//! Markdown rule table.

use crate::models::PackageInfo;

const CHECK: &str = "✅";

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render `rules.md`: Rule ID, Description, Fixable, Recommended.
pub fn render_docs_table(pkg: &PackageInfo) -> String {
    let mut lines = vec![
        "<!-- GENERATED, DO NOT EDIT DIRECTLY -->".to_string(),
        String::new(),
        "| Rule ID | Description | Fixable | Recommended |".to_string(),
        "| --- | --- | :-: | :-: |".to_string(),
    ];
    for rule in &pkg.rules {
        lines.push(format!(
            "| [`{}`](./rules/{}) | {} | {} | {} |",
            rule.rule_id,
            rule.name,
            cell(rule.description().unwrap_or_default()),
            if rule.fixable() { CHECK } else { "" },
            if rule.recommended() { CHECK } else { "" },
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleDocsInfo, RuleInfo, RuleMetaInfo};

    #[test]
    fn test_table_rows_follow_catalog_order() {
        let rule = |name: &str, meta: RuleMetaInfo| RuleInfo {
            name: name.to_string(),
            rule_id: format!("@stylistic/js/{}", name),
            original_id: Some(name.to_string()),
            entry: String::new(),
            docs_entry: String::new(),
            meta,
        };
        let pkg = PackageInfo {
            name: "@stylistic/eslint-plugin-js".into(),
            short_id: "js".into(),
            pkg_id: "@stylistic/js".into(),
            path: "packages/eslint-plugin-js".into(),
            rules: vec![
                rule(
                    "comma-style",
                    RuleMetaInfo {
                        fixable: Some("code".into()),
                        docs: Some(RuleDocsInfo {
                            description: Some("Enforce a | b style".into()),
                            recommended: Some(true),
                        }),
                    },
                ),
                rule("semi", RuleMetaInfo::default()),
            ],
        };
        let out = render_docs_table(&pkg);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[2], "| Rule ID | Description | Fixable | Recommended |");
        assert_eq!(
            lines[4],
            "| [`@stylistic/js/comma-style`](./rules/comma-style) | Enforce a \\| b style | ✅ | ✅ |"
        );
        assert_eq!(lines[5], "| [`@stylistic/js/semi`](./rules/semi) |  |  |  |");
    }
}
