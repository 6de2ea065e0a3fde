//! Rule descriptor contract: the default value a rule module exposes.
//!
//! Every field is optional. Missing `meta`, or any missing sub-field, maps to
//! `None` and never fails deserialization. Unknown fields are ignored.

use serde::Deserialize;
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
/// Default export of a rule module.
pub struct RuleModule {
    #[serde(default)]
    pub meta: Option<RuleMeta>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RuleMeta {
    #[serde(default)]
    pub fixable: Option<String>,
    #[serde(default)]
    pub docs: Option<RuleDocs>,
    /// messageId -> template; insertion order is preserved.
    #[serde(default)]
    pub messages: Option<Map<String, Json>>,
    /// A single schema object, or an array of positional schemas.
    #[serde(default)]
    pub schema: Option<Json>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RuleDocs {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recommended: Option<bool>,
}

impl RuleModule {
    pub fn schema(&self) -> Option<&Json> {
        self.meta.as_ref()?.schema.as_ref()
    }

    /// Declared message ids, in declaration order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.meta
            .as_ref()
            .and_then(|m| m.messages.as_ref())
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
