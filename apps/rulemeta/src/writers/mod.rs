//! Artifact writers.
//!
//! Every writer is a pure projection from the catalog to an [`Artifact`];
//! [`persist`] is the only place that touches the filesystem and it always
//! replaces the whole file.

pub mod docs;
pub mod dts;
pub mod exports;
pub mod index;
pub mod metadata;

use crate::assemble::LoadedPackage;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::schema::RuleTypes;
use std::fs;
use std::path::PathBuf;

/// Generated file contents and where they go.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Every per-package artifact. Packages without rules produce none.
pub fn package_artifacts(
    pkg: &LoadedPackage,
    types: &[RuleTypes],
    settings: &Settings,
) -> Result<Vec<Artifact>> {
    let info = &pkg.info;
    if info.rules.is_empty() {
        return Ok(Vec::new());
    }
    let dir = &pkg.dir;
    let mut out = vec![
        Artifact {
            path: dir.join("rules/index.ts"),
            contents: index::render_index(info, settings.is_untyped(&info.short_id)),
        },
        Artifact {
            path: dir.join("dts/rule-options.d.ts"),
            contents: dts::render_rule_options(info, &settings.docs_url),
        },
        Artifact {
            path: dir.join("dts/define-config-support.d.ts"),
            contents: dts::render_define_config_support(
                &settings.augment_module,
                &settings.augment_interface,
            ),
        },
        Artifact {
            path: dir.join("rules.md"),
            contents: docs::render_docs_table(info),
        },
        Artifact {
            path: dir.join("package.json"),
            contents: exports::render_manifest(&pkg.manifest, info)?,
        },
    ];
    for (rule, rule_types) in info.rules.iter().zip(types) {
        out.push(Artifact {
            path: dir.join("rules").join(&rule.name).join("types.d.ts"),
            contents: dts::render_rule_types(rule_types),
        });
    }
    Ok(out)
}

/// Write `artifact`, creating parent directories as needed.
pub fn persist(artifact: &Artifact) -> Result<()> {
    let write_err = |source| Error::Write {
        path: artifact.path.clone(),
        source,
    };
    if let Some(parent) = artifact.path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&artifact.path, &artifact.contents).map_err(write_err)?;
    tracing::debug!(path = %artifact.path.display(), "wrote artifact");
    Ok(())
}
