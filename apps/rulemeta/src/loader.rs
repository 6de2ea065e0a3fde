//! Rule loading: entry resolution and descriptor access.
//!
//! Rule sources are never executed. Descriptors reach the pipeline through a
//! [`DescriptorSource`]: either a sidecar `descriptor.json` written next to
//! each rule by an extraction step, or a registry populated at build time.

use crate::error::{Error, Result};
use crate::models::descriptor::RuleModule;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Entry extensions in resolution order: preferred first, then the fallback.
pub const ENTRY_EXTENSIONS: [&str; 2] = ["ts", "js"];

/// File name of the serialized default export inside a rule directory.
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// Resolve `<rule_dir>/<name>.<ext>` trying [`ENTRY_EXTENSIONS`] in order.
pub fn resolve_entry(rule_dir: &Path, name: &str) -> Result<PathBuf> {
    for ext in ENTRY_EXTENSIONS {
        let candidate = rule_dir.join(format!("{}.{}", name, ext));
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(Error::MissingEntry {
        rule: name.to_string(),
        tried: ENTRY_EXTENSIONS
            .iter()
            .map(|ext| format!("{}.{}", name, ext))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Immediate subdirectories of `rules_dir`, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_rule_dirs(rules_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !rules_dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(rules_dir).map_err(|e| Error::read(rules_dir, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::read(rules_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().to_string(), path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// Supplies the default export of a rule module.
pub trait DescriptorSource: Send + Sync {
    fn load(&self, name: &str, entry: &Path) -> Result<RuleModule>;
}

/// Reads `descriptor.json` beside the rule entry. A rule without one is
/// treated as exporting no `meta`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SidecarDescriptors;

impl DescriptorSource for SidecarDescriptors {
    fn load(&self, name: &str, entry: &Path) -> Result<RuleModule> {
        let dir = entry.parent().unwrap_or_else(|| Path::new("."));
        let path = dir.join(DESCRIPTOR_FILE);
        if !path.is_file() {
            return Ok(RuleModule::default());
        }
        let s = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
        serde_json::from_str(&s).map_err(|e| Error::Descriptor {
            rule: name.to_string(),
            message: format!("{}: {}", path.to_string_lossy(), e),
        })
    }
}

/// Descriptors registered ahead of time, keyed by rule name.
///
/// This is the seam for library users that already hold rule descriptors
/// in memory (for example from a build step that imports every rule) and
/// want to run the pipeline without sidecar files. Rules that were not
/// registered load with no `meta`.
///
/// ```
/// use rulemeta::loader::StaticRegistry;
/// use rulemeta::models::descriptor::RuleModule;
///
/// let mut registry = StaticRegistry::new();
/// registry.register("semi", RuleModule::default());
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticRegistry {
    modules: HashMap<String, RuleModule>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, module: RuleModule) -> &mut Self {
        self.modules.insert(name.into(), module);
        self
    }
}

impl DescriptorSource for StaticRegistry {
    fn load(&self, name: &str, _entry: &Path) -> Result<RuleModule> {
        Ok(self.modules.get(name).cloned().unwrap_or_default())
    }
}
