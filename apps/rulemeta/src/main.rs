//! rulemeta CLI binary entry point.
//! Resolves settings, runs the pipeline and prints a summary.

use clap::Parser;
use rulemeta::cli::Cli;
use rulemeta::loader::SidecarDescriptors;
use rulemeta::pipeline::{self, Context};
use rulemeta::{config, output, utils};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} cannot read working directory: {}", utils::error_prefix(), e);
            std::process::exit(1);
        }
    };
    let settings = match config::resolve_settings(&cwd) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(1);
        }
    };
    eprintln!(
        "{} repository root: {}",
        utils::info_prefix(),
        settings.repo_root.to_string_lossy()
    );

    let source = SidecarDescriptors;
    let mut ctx = Context::new(settings, &source);
    if let Err(e) = pipeline::run(&mut ctx) {
        eprintln!("{} {}", utils::error_prefix(), e);
        std::process::exit(1);
    }
    output::print_summary(&ctx);
}
