//! CLI argument parsing via `clap`.
//!
//! The generator takes no arguments; clap only supplies `--help` and
//! `--version`.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rulemeta",
    version,
    about = "Regenerate rule indexes, declarations, docs and metadata",
    long_about = "rulemeta — scans rule packages, merges their metadata and regenerates derived artifacts.\n\nConfiguration: rulemeta.toml|yaml at the repository root (optional). Log level: RUST_LOG."
)]
/// Top-level CLI (no options).
pub struct Cli {}
