//! Global metadata module shared by every package.

use crate::error::Result;
use crate::models::PackageInfo;
use crate::utils::GENERATED_BANNER;

/// Render the metadata module: `packages` is every discovered package with
/// `merged` appended, `rules` is the flattened rule list of all of them.
/// Both are frozen.
pub fn render_metadata(packages: &[PackageInfo], merged: &PackageInfo) -> Result<String> {
    let mut published: Vec<&PackageInfo> = packages.iter().collect();
    published.push(merged);
    let literal = serde_json::to_string_pretty(&published)?;
    Ok(format!(
        "{banner}\n\n\
         import type {{ PackageInfo, RuleInfo }} from './types'\n\n\
         export const packages: Readonly<PackageInfo[]> = Object.freeze({literal})\n\n\
         export const rules: Readonly<RuleInfo[]> = Object.freeze(packages.flatMap(p => p.rules))\n",
        banner = GENERATED_BANNER,
        literal = literal,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleInfo, RuleMetaInfo};

    fn package(short_id: &str, rules: &[&str]) -> PackageInfo {
        let pkg_id = format!("@stylistic/{}", short_id);
        PackageInfo {
            name: format!("@stylistic/eslint-plugin-{}", short_id),
            short_id: short_id.to_string(),
            path: format!("packages/eslint-plugin-{}", short_id),
            rules: rules
                .iter()
                .map(|n| RuleInfo {
                    name: n.to_string(),
                    rule_id: format!("{}/{}", pkg_id, n),
                    original_id: None,
                    entry: format!("packages/eslint-plugin-{0}/rules/{1}/{1}.ts", short_id, n),
                    docs_entry: format!("packages/eslint-plugin-{0}/rules/{1}/README.md", short_id, n),
                    meta: RuleMetaInfo::default(),
                })
                .collect(),
            pkg_id,
        }
    }

    #[test]
    fn test_metadata_appends_merged_package_last() {
        let js = package("js", &["semi"]);
        let mut merged = package("default", &["semi"]);
        merged.pkg_id = "@stylistic".into();
        let out = render_metadata(&[js], &merged).unwrap();

        let start = out.find("Object.freeze(").unwrap() + "Object.freeze(".len();
        let end = out.find(")\n\nexport const rules").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out[start..end]).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["shortId"], "js");
        assert_eq!(arr[1]["shortId"], "default");
        assert_eq!(arr[0]["rules"][0]["ruleId"], "@stylistic/js/semi");
        assert_eq!(arr[0]["rules"][0]["docsEntry"], "packages/eslint-plugin-js/rules/semi/README.md");
        // absent optionals are omitted rather than null
        assert!(arr[0]["rules"][0].get("originalId").is_none());
        assert!(out.contains("packages.flatMap(p => p.rules)"));
    }
}
