//! Shared data models: the per-package rule catalog and the rule descriptor
//! contract consumed from rule sources.

pub mod descriptor;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One rule-collection package and its ordered rule catalog.
pub struct PackageInfo {
    pub name: String,
    pub short_id: String,
    pub pkg_id: String,
    pub path: String,
    pub rules: Vec<RuleInfo>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Metadata record for a single rule.
pub struct RuleInfo {
    pub name: String,
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    pub entry: String,
    pub docs_entry: String,
    pub meta: RuleMetaInfo,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
/// The subset of a rule's `meta` that is published in the catalog.
pub struct RuleMetaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<RuleDocsInfo>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RuleDocsInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
}

impl RuleInfo {
    pub fn description(&self) -> Option<&str> {
        self.meta.docs.as_ref()?.description.as_deref()
    }

    pub fn recommended(&self) -> bool {
        self.meta
            .docs
            .as_ref()
            .and_then(|d| d.recommended)
            .unwrap_or(false)
    }

    pub fn fixable(&self) -> bool {
        self.meta.fixable.is_some()
    }
}
