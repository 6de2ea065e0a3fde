//! rulemeta core library.
//!
//! Scans rule-collection packages, assembles a metadata catalog per package,
//! merges catalogs into one default package and regenerates the derived
//! artifacts (rule indexes, type declarations, docs tables, export maps and
//! the global metadata module).
//!
//! High-level modules:
//! - `config`: Discovery of `rulemeta.toml|yaml` and settings resolution.
//! - `discover`: Package discovery from a manifest glob.
//! - `loader`: Rule entry resolution and descriptor sources.
//! - `assemble`: Per-package catalog assembly.
//! - `schema`: Options schema to TypeScript compilation.
//! - `merge`: Cross-package merge with explicit precedence.
//! - `writers`: Pure artifact projections and persistence.
//! - `pipeline`: Run context and stage orchestration.
//! - `output`: Run summary printer.
pub mod assemble;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod loader;
pub mod merge;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod utils;
pub mod writers;
