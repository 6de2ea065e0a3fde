//! Package manifest export map.

use crate::error::Result;
use crate::models::PackageInfo;
use serde_json::{json, Map, Value as Json};

/// The complete `exports` map for a package, in rule order.
pub fn export_map(pkg: &PackageInfo) -> Json {
    let mut map = Map::new();
    map.insert(
        ".".into(),
        json!({
            "types": "./dist/index.d.ts",
            "import": "./dist/index.js",
            "require": "./dist/index.js"
        }),
    );
    map.insert(
        "./define-config-support".into(),
        json!({ "types": "./dts/define-config-support.d.ts" }),
    );
    map.insert(
        "./rule-options".into(),
        json!({ "types": "./dts/rule-options.d.ts" }),
    );
    for rule in &pkg.rules {
        map.insert(
            format!("./rules/{}", rule.name),
            Json::String(format!("./dist/{}.js", rule.name)),
        );
    }
    Json::Object(map)
}

/// Replace `exports` in `manifest`, leaving every other field (and its
/// position) untouched. A manifest without `exports` gets it appended.
pub fn render_manifest(manifest: &Json, pkg: &PackageInfo) -> Result<String> {
    let mut manifest = manifest.clone();
    if let Json::Object(fields) = &mut manifest {
        fields.insert("exports".into(), export_map(pkg));
    }
    Ok(serde_json::to_string_pretty(&manifest)? + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleInfo, RuleMetaInfo};

    fn pkg(names: &[&str]) -> PackageInfo {
        PackageInfo {
            name: "@stylistic/eslint-plugin-js".into(),
            short_id: "js".into(),
            pkg_id: "@stylistic/js".into(),
            path: "packages/eslint-plugin-js".into(),
            rules: names
                .iter()
                .map(|n| RuleInfo {
                    name: n.to_string(),
                    rule_id: format!("@stylistic/js/{}", n),
                    original_id: None,
                    entry: String::new(),
                    docs_entry: String::new(),
                    meta: RuleMetaInfo::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_export_map_keys_and_targets() {
        let map = export_map(&pkg(&["a", "b"]));
        let keys: Vec<_> = map.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![".", "./define-config-support", "./rule-options", "./rules/a", "./rules/b"]
        );
        assert_eq!(map["."]["import"], "./dist/index.js");
        assert_eq!(map["./rule-options"]["types"], "./dts/rule-options.d.ts");
        assert_eq!(map["./rules/b"], "./dist/b.js");
    }

    #[test]
    fn test_manifest_rewrite_replaces_exports_in_place() {
        let manifest = json!({
            "name": "@stylistic/eslint-plugin-js",
            "exports": { "./stale": "./dist/stale.js" },
            "files": ["dist"]
        });
        let out = render_manifest(&manifest, &pkg(&["a"])).unwrap();
        let parsed: Json = serde_json::from_str(&out).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "exports", "files"]);
        assert!(parsed["exports"].get("./stale").is_none());
        assert_eq!(parsed["exports"]["./rules/a"], "./dist/a.js");
        assert!(out.ends_with("}\n"));
    }
}
