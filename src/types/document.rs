use serde::Deserialize;
use serde_json::Value;

use super::error::DocumentError;
use super::node::RuleNode;

/// A property rule-tree document: the `rules` tree plus property metadata.
///
/// Only the keys used by the analyzer are decoded; everything else in the
/// envelope (etag, warnings, comments, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTree {
    pub rules: RuleNode,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub property_version: Option<u64>,
    #[serde(default)]
    pub rule_format: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    /// Property-level asset identifier, used to name default image policy sets.
    #[serde(default)]
    pub asset_id: Option<String>,
}

impl RuleTree {
    /// Wrap a bare rule node with no property metadata.
    #[must_use]
    pub fn from_rules(rules: RuleNode) -> Self {
        Self {
            rules,
            property_id: None,
            property_name: None,
            property_version: None,
            rule_format: None,
            account_id: None,
            contract_id: None,
            group_id: None,
            asset_id: None,
        }
    }

    /// Parse a property document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the input is not JSON, not an object, or
    /// has no `rules` object.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Decode a property document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the value does not have the document shape.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Some(object) = value.as_object() else {
            return Err(DocumentError::NotAnObject {
                what: "property document",
            });
        };
        if !object.get("rules").is_some_and(Value::is_object) {
            return Err(DocumentError::MissingRules);
        }
        let tree: RuleTree = serde_json::from_value(value)?;
        tracing::debug!(
            property_id = tree.property_id.as_deref().unwrap_or("-"),
            nodes = tree.rules.node_count(),
            "decoded rule tree"
        );
        Ok(tree)
    }

    /// Read and parse a property document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`RulewalkError`](crate::RulewalkError) on I/O or document failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::RulewalkError> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&input)?)
    }
}
