use serde::Deserialize;

use super::behavior::Behavior;
use super::criterion::Criterion;
use super::error::DocumentError;

/// How a node's own criteria of one kind combine.
///
/// Governs only criteria on the same node; nesting across nodes is always
/// conjunctive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaPolicy {
    #[default]
    All,
    Any,
}

/// A node of a property rule tree.
///
/// Children are exclusively owned; the tree is read-only once decoded.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RuleNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    behaviors: Vec<Behavior>,
    #[serde(default)]
    criteria: Vec<Criterion>,
    #[serde(default, rename = "criteriaMustSatisfy")]
    criteria_policy: CriteriaPolicy,
    #[serde(default)]
    children: Vec<RuleNode>,
}

impl RuleNode {
    /// Create an empty node with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Decode a single rule node (the `rules` object of a property document).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the input is not JSON or not a node object.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Decode a rule node from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnObject`] for non-object values and
    /// [`DocumentError::Json`] if the object does not have the node shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::NotAnObject {
                what: "rule node",
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: CriteriaPolicy) -> Self {
        self.criteria_policy = policy;
        self
    }

    #[must_use]
    pub fn child(mut self, child: RuleNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[must_use]
    pub fn criteria_policy(&self) -> CriteriaPolicy {
        self.criteria_policy
    }

    #[must_use]
    pub fn children(&self) -> &[RuleNode] {
        &self.children
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RuleNode::node_count).sum::<usize>()
    }
}
