//! Run summary printer.
//!
//! Colors follow the usual conventions and are disabled by `NO_COLOR`.

use crate::pipeline::Context;
use crate::utils::{rel_path, use_colors};
use owo_colors::OwoColorize;

/// Compose the human summary lines (pure) for testing purposes.
pub fn compose_summary(ctx: &Context) -> Vec<String> {
    let mut lines = Vec::new();
    for pkg in &ctx.packages {
        if pkg.rules.is_empty() {
            lines.push(format!("⏭️  {} (no rules)", pkg.name));
        } else {
            lines.push(format!("📦 {} ({} rules)", pkg.name, pkg.rules.len()));
        }
    }
    if let Some(merged) = ctx.merged.as_ref() {
        lines.push(format!("🔗 {} ({} rules)", merged.name, merged.rules.len()));
    }
    lines.push(format!(
        "— Summary — packages={} artifacts={}",
        ctx.packages.len(),
        ctx.written.len()
    ));
    lines
}

/// Print the summary of a finished run.
pub fn print_summary(ctx: &Context) {
    let color = use_colors();
    let lines = compose_summary(ctx);
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        if color && i == last {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
    if let Some(path) = ctx.written.last() {
        let shown = rel_path(path, &ctx.settings.repo_root);
        if color {
            println!("{} {}", "✏️  metadata:".green().bold(), shown);
        } else {
            println!("✏️  metadata: {}", shown);
        }
    }
}
