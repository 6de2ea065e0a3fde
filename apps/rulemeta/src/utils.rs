//! Small helpers shared by the writers and the CLI.

use owo_colors::OwoColorize;
use std::path::Path;

/// Banner placed at the top of every generated TypeScript/Markdown file.
pub const GENERATED_BANNER: &str = "/* GENERATED, DO NOT EDIT DIRECTLY */";

/// Colors are on unless `NO_COLOR` is set.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors() {
        "⟦error⟧".red().bold().to_string()
    } else {
        "⟦error⟧".to_string()
    }
}

pub fn info_prefix() -> String {
    if use_colors() {
        "⟦info⟧".blue().bold().to_string()
    } else {
        "⟦info⟧".to_string()
    }
}

/// Path of `target` relative to `base`, always with `/` separators so
/// generated output is identical across platforms.
pub fn rel_path(target: &Path, base: &Path) -> String {
    let rel = pathdiff::diff_paths(target, base).unwrap_or_else(|| target.to_path_buf());
    rel.to_string_lossy().replace('\\', "/")
}

/// `no-mixed-spaces` -> `noMixedSpaces`.
pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `no-mixed-spaces` -> `NoMixedSpaces`. Any non-alphanumeric character acts
/// as a word boundary.
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Single-quoted TypeScript string literal.
pub fn ts_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Text safe to place inside a `/** ... */` block.
pub fn doc_text(s: &str) -> String {
    s.replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(camel_case("no-mixed-spaces"), "noMixedSpaces");
        assert_eq!(pascal_case("jsx-quotes"), "JsxQuotes");
        assert_eq!(pascal_case("basic_config"), "BasicConfig");
        assert_eq!(camel_case("quotes"), "quotes");
    }

    #[test]
    fn test_ts_string_escapes_quotes() {
        assert_eq!(ts_string("it's"), "'it\\'s'");
        assert_eq!(ts_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_rel_path_uses_forward_slashes() {
        let base = Path::new("/repo");
        let target = Path::new("/repo/packages/a/rules/x/x.ts");
        assert_eq!(rel_path(target, base), "packages/a/rules/x/x.ts");
    }
}
