use std::collections::BTreeMap;

use serde::Serialize;

use super::criterion::MatchKind;

/// Per-kind alternative match expressions that gate one origin location.
///
/// Every [`MatchKind`] has an entry; an empty list means the ancestor chain
/// does not refine that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedCriteria {
    alternatives: BTreeMap<MatchKind, Vec<String>>,
}

impl Default for CombinedCriteria {
    fn default() -> Self {
        Self {
            alternatives: MatchKind::ALL.into_iter().map(|k| (k, Vec::new())).collect(),
        }
    }
}

impl CombinedCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alternatives for one kind.
    #[must_use]
    pub fn with(mut self, kind: MatchKind, alternatives: Vec<String>) -> Self {
        self.alternatives.insert(kind, alternatives);
        self
    }

    #[must_use]
    pub fn alternatives(&self, kind: MatchKind) -> &[String] {
        self.alternatives
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate kinds in output order with their alternatives.
    pub fn iter(&self) -> impl Iterator<Item = (MatchKind, &[String])> {
        self.alternatives.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Whether no kind carries any alternative.
    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.alternatives.values().all(Vec::is_empty)
    }

    /// Total number of alternatives across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alternatives.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
