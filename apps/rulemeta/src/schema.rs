//! Options schema compiler: JSON Schema -> TypeScript declarations.
//!
//! Each positional schema entry becomes `export type Schema<i> = ...`.
//! Definitions reached through `$ref` are emitted as extra aliases named
//! `Schema<i><Definition>`, so recursive definitions stay expressible.
//!
//! Compilation failures are contained: the failing entry is declared as
//! `unknown`, a warning is logged, and the remaining entries and rules are
//! compiled normally.

use crate::models::descriptor::RuleModule;
use crate::utils::{doc_text, pascal_case, ts_string};
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("unresolvable $ref '{0}'")]
    UnresolvedRef(String),
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),
    #[error("invalid schema: {0}")]
    Invalid(String),
}

/// Compiled type surface of one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTypes {
    /// `export type SchemaN = ...` blocks, in positional order.
    pub declarations: Vec<String>,
    /// Right-hand side of `RuleOptions`.
    pub options: String,
    /// Right-hand side of `MessageIds`.
    pub message_ids: String,
}

fn items_ref() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#/items/(\d+)(/.*)?$").expect("static regex"))
}

fn identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex"))
}

/// Rewrite `$ref`s written against the options array so they point into
/// the standalone entry at `index`: `#/items/<index>/...` becomes `#/...`.
///
/// References into other entries are left as they are; they do not resolve
/// inside this entry and end up as `unknown`.
pub fn normalize_refs(schema: &mut Json, index: usize) {
    match schema {
        Json::Object(map) => {
            for (key, value) in map.iter_mut() {
                match value {
                    Json::String(r) if key == "$ref" => {
                        if let Some(rest) = own_items_ref(r, index) {
                            *r = format!("#{}", rest);
                        }
                    }
                    _ => normalize_refs(value, index),
                }
            }
        }
        Json::Array(items) => items.iter_mut().for_each(|v| normalize_refs(v, index)),
        _ => {}
    }
}

fn own_items_ref(r: &str, index: usize) -> Option<String> {
    let caps = items_ref().captures(r)?;
    if caps[1].parse::<usize>().ok()? != index {
        return None;
    }
    Some(caps.get(2).map_or("", |m| m.as_str()).to_string())
}

/// Compile the options schema and message catalog of one rule.
pub fn compile_rule(rule_id: &str, module: &RuleModule) -> RuleTypes {
    let (declarations, options) = match module.schema() {
        None => (Vec::new(), "[]".to_string()),
        Some(Json::Array(entries)) => {
            let decls: Vec<String> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let mut normalized = entry.clone();
                    normalize_refs(&mut normalized, i);
                    compile_entry(rule_id, i, &normalized)
                })
                .collect();
            let slots: Vec<String> = (0..entries.len())
                .map(|i| format!("Schema{}?", i))
                .collect();
            (decls, format!("[{}]", slots.join(", ")))
        }
        Some(single) => (
            vec![compile_entry(rule_id, 0, single)],
            "Schema0".to_string(),
        ),
    };

    let ids = module.message_ids();
    let message_ids = if ids.is_empty() {
        "never".to_string()
    } else {
        ids.iter().map(|id| ts_string(id)).collect::<Vec<_>>().join(" | ")
    };

    RuleTypes {
        declarations,
        options,
        message_ids,
    }
}

fn compile_entry(rule_id: &str, index: usize, entry: &Json) -> String {
    let name = format!("Schema{}", index);
    match compile_schema(&name, entry) {
        Ok(decl) => decl,
        Err(err) => {
            tracing::warn!(
                rule = rule_id,
                index,
                error = %err,
                "schema compilation failed, falling back to unknown"
            );
            format!("export type {} = unknown", name)
        }
    }
}

/// Compile a standalone schema into `export type <name> = ...` plus one
/// alias per referenced definition.
pub fn compile_schema(name: &str, schema: &Json) -> Result<String, SchemaError> {
    let mut compiler = Compiler {
        root: schema,
        aliases: vec![(String::new(), name.to_string())],
        base: name,
    };
    let mut out = Vec::new();
    let mut i = 0;
    // Compiling an alias may register more aliases.
    while i < compiler.aliases.len() {
        let (pointer, alias) = compiler.aliases[i].clone();
        let node = schema
            .pointer(&pointer)
            .ok_or_else(|| SchemaError::UnresolvedRef(format!("#{}", pointer)))?;
        let ty = compiler.ty(node, 0)?;
        let doc = description(node)
            .map(|d| format!("/** {} */\n", doc_text(d)))
            .unwrap_or_default();
        out.push(format!("{}export type {} = {}", doc, alias, ty.text));
        i += 1;
    }
    Ok(out.join("\n\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Union,
    Intersection,
    Atom,
}

struct Ty {
    text: String,
    prec: Prec,
}

impl Ty {
    fn atom(text: impl Into<String>) -> Self {
        Ty {
            text: text.into(),
            prec: Prec::Atom,
        }
    }

    fn at_least(&self, prec: Prec) -> String {
        if self.prec < prec {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }
}

struct Compiler<'a> {
    root: &'a Json,
    /// (JSON pointer, alias name); index 0 is the root.
    aliases: Vec<(String, String)>,
    base: &'a str,
}

impl<'a> Compiler<'a> {
    fn ty(&mut self, node: &Json, depth: usize) -> Result<Ty, SchemaError> {
        match node {
            Json::Bool(true) => Ok(Ty::atom("unknown")),
            Json::Bool(false) => Ok(Ty::atom("never")),
            Json::Object(map) => self.schema(map, depth),
            other => Err(SchemaError::Invalid(format!(
                "expected object or boolean, found {}",
                other
            ))),
        }
    }

    fn schema(&mut self, map: &Map<String, Json>, depth: usize) -> Result<Ty, SchemaError> {
        if let Some(r) = map.get("$ref") {
            let r = r
                .as_str()
                .ok_or_else(|| SchemaError::Invalid("$ref must be a string".into()))?;
            return self.reference(r);
        }
        if let Some(value) = map.get("const") {
            return Ok(Ty::atom(literal(value)));
        }
        if let Some(values) = map.get("enum") {
            let values = values
                .as_array()
                .ok_or_else(|| SchemaError::Invalid("enum must be an array".into()))?;
            return Ok(union(values.iter().map(|v| Ty::atom(literal(v))).collect()));
        }
        for key in ["anyOf", "oneOf"] {
            if let Some(members) = map.get(key) {
                let members = self.members(key, members, depth)?;
                return Ok(union(members));
            }
        }
        if let Some(members) = map.get("allOf") {
            let members = self.members("allOf", members, depth)?;
            return Ok(intersection(members));
        }
        match map.get("type") {
            Some(Json::String(t)) => self.typed(t, map, depth),
            Some(Json::Array(types)) => {
                let mut members = Vec::new();
                for t in types {
                    let t = t
                        .as_str()
                        .ok_or_else(|| SchemaError::Invalid("type must be a string".into()))?;
                    members.push(self.typed(t, map, depth)?);
                }
                Ok(union(members))
            }
            Some(other) => Err(SchemaError::Invalid(format!("type {}", other))),
            None if map.contains_key("properties") || map.contains_key("additionalProperties") => {
                self.object(map, depth)
            }
            None if map.contains_key("items") => self.array(map, depth),
            None => Ok(Ty::atom("unknown")),
        }
    }

    fn members(&mut self, key: &str, members: &Json, depth: usize) -> Result<Vec<Ty>, SchemaError> {
        let members = members
            .as_array()
            .ok_or_else(|| SchemaError::Invalid(format!("{} must be an array", key)))?;
        members.iter().map(|m| self.ty(m, depth)).collect()
    }

    fn typed(&mut self, t: &str, map: &Map<String, Json>, depth: usize) -> Result<Ty, SchemaError> {
        match t {
            "string" => Ok(Ty::atom("string")),
            "number" | "integer" => Ok(Ty::atom("number")),
            "boolean" => Ok(Ty::atom("boolean")),
            "null" => Ok(Ty::atom("null")),
            "array" => self.array(map, depth),
            "object" => self.object(map, depth),
            other => Err(SchemaError::UnsupportedType(other.to_string())),
        }
    }

    fn array(&mut self, map: &Map<String, Json>, depth: usize) -> Result<Ty, SchemaError> {
        match map.get("items") {
            Some(Json::Array(slots)) => {
                let min = map.get("minItems").and_then(Json::as_u64).unwrap_or(0) as usize;
                let mut parts = Vec::with_capacity(slots.len());
                for (i, slot) in slots.iter().enumerate() {
                    let ty = self.ty(slot, depth)?;
                    let optional = if i < min { "" } else { "?" };
                    // optional tuple members bind tighter than unions
                    let text = if optional.is_empty() {
                        ty.text
                    } else {
                        ty.at_least(Prec::Atom)
                    };
                    parts.push(format!("{}{}", text, optional));
                }
                Ok(Ty::atom(format!("[{}]", parts.join(", "))))
            }
            Some(item) => {
                let ty = self.ty(item, depth)?;
                Ok(Ty::atom(format!("{}[]", ty.at_least(Prec::Atom))))
            }
            None => Ok(Ty::atom("unknown[]")),
        }
    }

    fn object(&mut self, map: &Map<String, Json>, depth: usize) -> Result<Ty, SchemaError> {
        let required: Vec<&str> = map
            .get("required")
            .and_then(Json::as_array)
            .map(|r| r.iter().filter_map(Json::as_str).collect())
            .unwrap_or_default();
        let indent = "  ".repeat(depth + 1);
        let mut lines = Vec::new();

        if let Some(props) = map.get("properties") {
            let props = props
                .as_object()
                .ok_or_else(|| SchemaError::Invalid("properties must be an object".into()))?;
            for (key, prop) in props {
                if let Some(desc) = description(prop) {
                    lines.push(format!("{}/**", indent));
                    for line in doc_text(desc).lines() {
                        lines.push(format!("{} * {}", indent, line).trim_end().to_string());
                    }
                    lines.push(format!("{} */", indent));
                }
                let ty = self.ty(prop, depth + 1)?;
                let optional = if required.contains(&key.as_str()) { "" } else { "?" };
                lines.push(format!("{}{}{}: {}", indent, property_key(key), optional, ty.text));
            }
        }

        match map.get("additionalProperties") {
            Some(Json::Bool(false)) => {}
            None | Some(Json::Bool(true)) => lines.push(format!("{}[k: string]: unknown", indent)),
            Some(extra) => {
                let ty = self.ty(extra, depth + 1)?;
                lines.push(format!("{}[k: string]: {}", indent, ty.text));
            }
        }

        if lines.is_empty() {
            return Ok(Ty::atom("{}"));
        }
        Ok(Ty::atom(format!(
            "{{\n{}\n{}}}",
            lines.join("\n"),
            "  ".repeat(depth)
        )))
    }

    fn reference(&mut self, r: &str) -> Result<Ty, SchemaError> {
        let pointer = r
            .strip_prefix('#')
            .ok_or_else(|| SchemaError::UnresolvedRef(r.to_string()))?;
        if let Some((_, alias)) = self.aliases.iter().find(|(p, _)| p == pointer) {
            return Ok(Ty::atom(alias.clone()));
        }
        if self.root.pointer(pointer).is_none() {
            return Err(SchemaError::UnresolvedRef(r.to_string()));
        }
        let alias = self.alias_for(pointer);
        self.aliases.push((pointer.to_string(), alias.clone()));
        Ok(Ty::atom(alias))
    }

    fn alias_for(&self, pointer: &str) -> String {
        let last = pointer
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .replace("~1", "/")
            .replace("~0", "~");
        let mut suffix = pascal_case(&last);
        if suffix.is_empty() || suffix.starts_with(|c: char| c.is_ascii_digit()) {
            suffix = format!("Def{}", suffix);
        }
        let base = format!("{}{}", self.base, suffix);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.aliases.iter().any(|(_, a)| *a == candidate) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        candidate
    }
}

fn description(node: &Json) -> Option<&str> {
    node.get("description")?.as_str()
}

fn literal(value: &Json) -> String {
    match value {
        Json::String(s) => ts_string(s),
        other => other.to_string(),
    }
}

fn property_key(key: &str) -> String {
    if identifier().is_match(key) {
        key.to_string()
    } else {
        ts_string(key)
    }
}

fn union(members: Vec<Ty>) -> Ty {
    let mut unique: Vec<Ty> = Vec::new();
    for m in members {
        if !unique.iter().any(|u| u.text == m.text) {
            unique.push(m);
        }
    }
    if unique.len() <= 1 {
        return unique.pop().unwrap_or_else(|| Ty::atom("never"));
    }
    Ty {
        text: unique
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
        prec: Prec::Union,
    }
}

fn intersection(mut members: Vec<Ty>) -> Ty {
    if members.len() <= 1 {
        return members.pop().unwrap_or_else(|| Ty::atom("unknown"));
    }
    Ty {
        text: members
            .iter()
            .map(|m| m.at_least(Prec::Intersection))
            .collect::<Vec<_>>()
            .join(" & "),
        prec: Prec::Intersection,
    }
}
