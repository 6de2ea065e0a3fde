//! Rule index module: imports every rule and re-exports them by name.

use crate::models::PackageInfo;
use crate::utils::{camel_case, ts_string, GENERATED_BANNER};

/// Render `rules/index.ts`. Untyped packages get `@ts-nocheck` until their
/// rules are migrated.
pub fn render_index(pkg: &PackageInfo, untyped: bool) -> String {
    let mut lines = vec![GENERATED_BANNER.to_string(), String::new()];
    if untyped {
        lines.push("// Rules in this package are not fully typed yet.".to_string());
        lines.push("// @ts-nocheck".to_string());
        lines.push(String::new());
    }
    for rule in &pkg.rules {
        lines.push(format!(
            "import {} from {}",
            camel_case(&rule.name),
            ts_string(&format!("./{}/{}", rule.name, rule.name))
        ));
    }
    lines.push(String::new());
    lines.push("export default {".to_string());
    for rule in &pkg.rules {
        lines.push(format!("  {}: {},", ts_string(&rule.name), camel_case(&rule.name)));
    }
    lines.push("}".to_string());
    lines.push(String::new());
    lines.join("\n")
}
