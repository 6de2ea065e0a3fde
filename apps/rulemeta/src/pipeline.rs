//! Pipeline orchestration.
//!
//! Packages are processed one at a time in discovery order; the merge and
//! the global metadata module come last because they need every catalog.
//! All run state lives in [`Context`].

use crate::assemble::read_package;
use crate::config::Settings;
use crate::discover::discover_packages;
use crate::error::Result;
use crate::loader::DescriptorSource;
use crate::merge::merge_packages;
use crate::models::PackageInfo;
use crate::schema::{compile_rule, RuleTypes};
use crate::writers::{self, metadata, Artifact};
use rayon::prelude::*;
use std::path::PathBuf;

/// State threaded through every stage of one run.
pub struct Context<'a> {
    pub settings: Settings,
    pub source: &'a dyn DescriptorSource,
    /// Catalogs of processed packages, in discovery order.
    pub packages: Vec<PackageInfo>,
    pub merged: Option<PackageInfo>,
    /// Files written so far, in write order.
    pub written: Vec<PathBuf>,
}

impl<'a> Context<'a> {
    pub fn new(settings: Settings, source: &'a dyn DescriptorSource) -> Self {
        Context {
            settings,
            source,
            packages: Vec::new(),
            merged: None,
            written: Vec::new(),
        }
    }

    fn persist(&mut self, artifact: Artifact) -> Result<()> {
        writers::persist(&artifact)?;
        self.written.push(artifact.path);
        Ok(())
    }
}

/// Run every stage. Artifacts already written stay on disk if a later
/// stage fails.
pub fn run(ctx: &mut Context) -> Result<()> {
    let root = ctx.settings.repo_root.clone();
    let dirs = discover_packages(&root, &ctx.settings.package_glob)?;
    tracing::info!(count = dirs.len(), "discovered packages");

    for dir in dirs {
        process_package(ctx, &dir)?;
    }

    let merged = merge_packages(&ctx.packages, &ctx.settings);
    tracing::info!(rules = merged.rules.len(), "merged default package");
    let contents = metadata::render_metadata(&ctx.packages, &merged)?;
    let path = root.join(&ctx.settings.metadata_path);
    ctx.persist(Artifact { path, contents })?;
    ctx.merged = Some(merged);
    Ok(())
}

fn process_package(ctx: &mut Context, dir: &std::path::Path) -> Result<()> {
    let pkg = read_package(&ctx.settings, dir, ctx.source)?;
    tracing::info!(
        package = %pkg.info.name,
        rules = pkg.info.rules.len(),
        "assembled package"
    );

    let types: Vec<RuleTypes> = pkg
        .info
        .rules
        .par_iter()
        .zip(pkg.modules.par_iter())
        .map(|(rule, module)| compile_rule(&rule.rule_id, module))
        .collect();

    for artifact in writers::package_artifacts(&pkg, &types, &ctx.settings)? {
        ctx.persist(artifact)?;
    }
    ctx.packages.push(pkg.info);
    Ok(())
}
