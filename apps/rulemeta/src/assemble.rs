//! Metadata assembly: one `PackageInfo` per discovered package.
//!
//! Rules are loaded on rayon's pool; `collect` on an indexed parallel
//! iterator keeps results in sorted-name order regardless of which load
//! finishes first.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::loader::{list_rule_dirs, resolve_entry, DescriptorSource};
use crate::models::descriptor::RuleModule;
use crate::models::{PackageInfo, RuleDocsInfo, RuleInfo, RuleMetaInfo};
use crate::utils::rel_path;
use rayon::prelude::*;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};

/// A package's catalog plus the inputs later stages need.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub dir: PathBuf,
    pub info: PackageInfo,
    /// Loaded descriptors, parallel to `info.rules`.
    pub modules: Vec<RuleModule>,
    /// Parsed `package.json`, key order preserved.
    pub manifest: Json,
}

/// Cross-reference of a rule in its upstream naming convention.
pub fn original_id(short_id: &str, name: &str) -> Option<String> {
    match short_id {
        "js" => Some(name.to_string()),
        "ts" => Some(format!("@typescript-eslint/{}", name)),
        "jsx" => Some(format!("react/{}", name)),
        _ => None,
    }
}

pub fn read_manifest(path: &Path) -> Result<Json> {
    let s = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let manifest: Json = serde_json::from_str(&s).map_err(|e| Error::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if !manifest.is_object() {
        return Err(Error::Manifest {
            path: path.to_path_buf(),
            message: "expected a JSON object".into(),
        });
    }
    Ok(manifest)
}

/// Build the catalog for the package in `dir`.
pub fn read_package(
    settings: &Settings,
    dir: &Path,
    source: &dyn DescriptorSource,
) -> Result<LoadedPackage> {
    let root = &settings.repo_root;
    let manifest_path = dir.join("package.json");
    let manifest = read_manifest(&manifest_path)?;
    let name = manifest
        .get("name")
        .and_then(Json::as_str)
        .ok_or_else(|| Error::Manifest {
            path: manifest_path.clone(),
            message: "missing string field 'name'".into(),
        })?
        .to_string();

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let short_id = dir_name
        .strip_prefix(settings.package_prefix.as_str())
        .unwrap_or(&dir_name)
        .to_string();
    let pkg_id = format!("{}/{}", settings.namespace, short_id);

    let rule_dirs = list_rule_dirs(&dir.join("rules"))?;
    let loaded: Vec<(RuleInfo, RuleModule)> = rule_dirs
        .par_iter()
        .map(|(rule_name, rule_dir)| -> Result<(RuleInfo, RuleModule)> {
            let entry = resolve_entry(rule_dir, rule_name)?;
            let module = source.load(rule_name, &entry)?;
            let info = RuleInfo {
                name: rule_name.clone(),
                rule_id: format!("{}/{}", pkg_id, rule_name),
                original_id: original_id(&short_id, rule_name),
                entry: rel_path(&entry, root),
                docs_entry: rel_path(&rule_dir.join("README.md"), root),
                meta: published_meta(&module),
            };
            Ok((info, module))
        })
        .collect::<Result<Vec<_>>>()?;
    let (rules, modules): (Vec<_>, Vec<_>) = loaded.into_iter().unzip();

    Ok(LoadedPackage {
        dir: dir.to_path_buf(),
        info: PackageInfo {
            name,
            short_id,
            pkg_id,
            path: rel_path(dir, root),
            rules,
        },
        modules,
        manifest,
    })
}

fn published_meta(module: &RuleModule) -> RuleMetaInfo {
    let Some(meta) = module.meta.as_ref() else {
        return RuleMetaInfo::default();
    };
    RuleMetaInfo {
        fixable: meta.fixable.clone(),
        docs: meta.docs.as_ref().map(|d| RuleDocsInfo {
            description: d.description.clone(),
            recommended: d.recommended,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{SidecarDescriptors, StaticRegistry};
    use serde_json::json;
    use tempfile::tempdir;

    fn write_rule(pkg: &Path, name: &str, ext: &str, descriptor: Option<Json>) {
        let dir = pkg.join("rules").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.{}", name, ext)), "export default {}").unwrap();
        if let Some(d) = descriptor {
            fs::write(dir.join("descriptor.json"), d.to_string()).unwrap();
        }
    }

    #[test]
    fn test_read_package_builds_sorted_catalog() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let pkg = root.join("packages/eslint-plugin-ts");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"name":"@stylistic/eslint-plugin-ts"}"#).unwrap();
        write_rule(
            &pkg,
            "semi",
            "ts",
            Some(json!({"meta": {"fixable": "code", "docs": {"description": "Require semicolons"}}})),
        );
        write_rule(&pkg, "indent", "js", None);
        for i in 0..20 {
            write_rule(&pkg, &format!("z-rule-{:02}", i), "ts", None);
        }

        let settings = Settings::defaults(root);
        let loaded = read_package(&settings, &pkg, &SidecarDescriptors).unwrap();
        let info = &loaded.info;
        assert_eq!(info.name, "@stylistic/eslint-plugin-ts");
        assert_eq!(info.short_id, "ts");
        assert_eq!(info.pkg_id, "@stylistic/ts");
        assert_eq!(info.path, "packages/eslint-plugin-ts");

        let names: Vec<_> = info.rules.iter().map(|r| r.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "indent");
        for r in &info.rules {
            assert_eq!(r.rule_id, format!("{}/{}", info.pkg_id, r.name));
        }

        let indent = &info.rules[0];
        assert_eq!(indent.entry, "packages/eslint-plugin-ts/rules/indent/indent.js");
        assert_eq!(indent.docs_entry, "packages/eslint-plugin-ts/rules/indent/README.md");
        assert_eq!(indent.original_id.as_deref(), Some("@typescript-eslint/indent"));
        assert_eq!(indent.meta, RuleMetaInfo::default());

        let semi = &info.rules[1];
        assert!(semi.fixable());
        assert_eq!(semi.description(), Some("Require semicolons"));
        assert!(!semi.recommended());
        assert_eq!(loaded.modules.len(), info.rules.len());
    }

    #[test]
    fn test_missing_entry_aborts_package() {
        let tmp = tempdir().unwrap();
        let pkg = tmp.path().join("eslint-plugin-js");
        fs::create_dir_all(pkg.join("rules/broken")).unwrap();
        fs::write(pkg.join("package.json"), r#"{"name":"p"}"#).unwrap();
        let err = read_package(&Settings::defaults(tmp.path()), &pkg, &StaticRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingEntry { .. }));
    }

    #[test]
    fn test_manifest_without_name_is_fatal() {
        let tmp = tempdir().unwrap();
        let pkg = tmp.path().join("eslint-plugin-js");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"version":"1.0.0"}"#).unwrap();
        let err = read_package(&Settings::defaults(tmp.path()), &pkg, &StaticRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_invalid_manifest_json_is_fatal() {
        let tmp = tempdir().unwrap();
        let pkg = tmp.path().join("eslint-plugin-js");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), "{ nope").unwrap();
        let err = read_package(&Settings::defaults(tmp.path()), &pkg, &StaticRegistry::new())
            .unwrap_err();
        match err {
            Error::Manifest { path, .. } => assert_eq!(path, pkg.join("package.json")),
            other => panic!("unexpected error: {}", other),
        }

        fs::write(pkg.join("package.json"), "[]").unwrap();
        let err = read_package(&Settings::defaults(tmp.path()), &pkg, &StaticRegistry::new())
            .unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }

    #[test]
    fn test_original_id_by_short_id() {
        assert_eq!(original_id("js", "semi").as_deref(), Some("semi"));
        assert_eq!(original_id("jsx", "jsx-indent").as_deref(), Some("react/jsx-indent"));
        assert_eq!(original_id("plus", "x"), None);
    }
}
