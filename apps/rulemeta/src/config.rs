//! Configuration discovery and settings resolution.
//!
//! rulemeta reads `rulemeta.toml|yaml|yml` from the repository root (or
//! closest ancestor) and fills in defaults for anything left out:
//! - `namespace`: `@stylistic`
//! - `packages`: `packages/eslint-plugin-*/package.json`
//! - `prefix`: `eslint-plugin-`
//! - `docs_url`: `https://eslint.style/rules`
//! - `metadata`: `packages/metadata/src/metadata.ts`
//! - `untyped`: `["js", "jsx"]`
//! - `merge.sources`: [`MERGE_PRECEDENCE`](crate::merge::MERGE_PRECEDENCE)
//! - `merge.short_id`: `default`
//! - `augment.module|interface`: `eslint-define-config` / `CustomRuleOptions`

use crate::error::{Error, Result};
use crate::merge::MERGE_PRECEDENCE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `rulemeta.toml|yaml`.
pub struct RulemetaConfig {
    pub namespace: Option<String>,
    pub packages: Option<String>,
    pub prefix: Option<String>,
    pub docs_url: Option<String>,
    pub metadata: Option<String>,
    pub untyped: Option<Vec<String>>,
    #[serde(default)]
    pub merge: Option<MergeCfg>,
    #[serde(default)]
    pub augment: Option<AugmentCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[merge]`: precedence-ordered source packages for the unioned catalog.
pub struct MergeCfg {
    pub sources: Option<Vec<String>>,
    pub short_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[augment]`: external config-schema module extended with `RuleOptions`.
pub struct AugmentCfg {
    pub module: Option<String>,
    pub interface: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Fully-resolved settings used by the pipeline.
pub struct Settings {
    pub repo_root: PathBuf,
    pub namespace: String,
    pub package_glob: String,
    pub package_prefix: String,
    pub docs_url: String,
    pub metadata_path: String,
    pub untyped: Vec<String>,
    pub merge_sources: Vec<String>,
    pub merged_short_id: String,
    pub augment_module: String,
    pub augment_interface: String,
}

impl Settings {
    /// Defaults for `repo_root`, ignoring any config file.
    pub fn defaults(repo_root: impl Into<PathBuf>) -> Self {
        Self::from_config(repo_root.into(), RulemetaConfig::default())
    }

    fn from_config(repo_root: PathBuf, cfg: RulemetaConfig) -> Self {
        let merge = cfg.merge.unwrap_or_default();
        let augment = cfg.augment.unwrap_or_default();
        Settings {
            repo_root,
            namespace: cfg.namespace.unwrap_or_else(|| "@stylistic".to_string()),
            package_glob: cfg
                .packages
                .unwrap_or_else(|| "packages/eslint-plugin-*/package.json".to_string()),
            package_prefix: cfg.prefix.unwrap_or_else(|| "eslint-plugin-".to_string()),
            docs_url: cfg
                .docs_url
                .unwrap_or_else(|| "https://eslint.style/rules".to_string())
                .trim_end_matches('/')
                .to_string(),
            metadata_path: cfg
                .metadata
                .unwrap_or_else(|| "packages/metadata/src/metadata.ts".to_string()),
            untyped: cfg
                .untyped
                .unwrap_or_else(|| vec!["js".to_string(), "jsx".to_string()]),
            merge_sources: merge
                .sources
                .unwrap_or_else(|| MERGE_PRECEDENCE.iter().map(|s| s.to_string()).collect()),
            merged_short_id: merge.short_id.unwrap_or_else(|| "default".to_string()),
            augment_module: augment
                .module
                .unwrap_or_else(|| "eslint-define-config".to_string()),
            augment_interface: augment
                .interface
                .unwrap_or_else(|| "CustomRuleOptions".to_string()),
        }
    }

    pub fn is_untyped(&self, short_id: &str) -> bool {
        self.untyped.iter().any(|s| s == short_id)
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `rulemeta.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if config_candidates(cur).iter().any(|p| p.exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

fn config_candidates(root: &Path) -> [PathBuf; 3] {
    [
        root.join("rulemeta.toml"),
        root.join("rulemeta.yaml"),
        root.join("rulemeta.yml"),
    ]
}

/// Load `RulemetaConfig` from `rulemeta.toml`, falling back to
/// `rulemeta.yaml|yml`. A present but malformed file is an error.
pub fn load_config(root: &Path) -> Result<Option<RulemetaConfig>> {
    let [toml_path, yaml, yml] = config_candidates(root);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|e| Error::read(&toml_path, e))?;
        let cfg = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for p in [yaml, yml] {
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|e| Error::read(&p, e))?;
            let cfg = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Settings` for a run started in `cwd`: config file > defaults.
pub fn resolve_settings(cwd: &Path) -> Result<Settings> {
    let repo_root = detect_repo_root(cwd);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    Ok(Settings::from_config(repo_root, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let s = resolve_settings(dir.path()).unwrap();
        assert_eq!(s.namespace, "@stylistic");
        assert_eq!(s.merge_sources, vec!["js", "ts", "jsx"]);
        assert_eq!(s.merged_short_id, "default");
        assert!(s.is_untyped("js"));
        assert!(!s.is_untyped("ts"));
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("rulemeta.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
namespace = "@acme"
docs_url = "https://docs.acme.dev/rules/"
untyped = []
[merge]
sources = ["base", "typed"]
[augment]
module = "acme-config"
    "#
        )
        .unwrap();

        let nested = root.join("packages/x");
        fs::create_dir_all(&nested).unwrap();
        let s = resolve_settings(&nested).unwrap();
        assert_eq!(s.repo_root, root);
        assert_eq!(s.namespace, "@acme");
        assert_eq!(s.docs_url, "https://docs.acme.dev/rules");
        assert!(s.untyped.is_empty());
        assert_eq!(s.merge_sources, vec!["base", "typed"]);
        assert_eq!(s.augment_module, "acme-config");
        // unspecified keys keep defaults
        assert_eq!(s.augment_interface, "CustomRuleOptions");
        assert_eq!(s.package_prefix, "eslint-plugin-");
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("rulemeta.yaml"),
            "namespace: \"@yaml\"\nmetadata: out/meta.ts\n",
        )
        .unwrap();
        let s = resolve_settings(root).unwrap();
        assert_eq!(s.namespace, "@yaml");
        assert_eq!(s.metadata_path, "out/meta.ts");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("rulemeta.toml"), "namespace = [").unwrap();
        let err = resolve_settings(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
