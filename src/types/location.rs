use std::fmt;

use serde::{Serialize, Serializer};

use super::node::RuleNode;

/// Position of a behavior inside a rule tree.
///
/// Stored as the child indices leading from the root to the node holding the
/// behavior, plus the behavior's index within that node. Rendered as a
/// JSON-path-like string such as `$.children[2].children[0].behaviors[1]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    children: Vec<usize>,
    behavior: usize,
}

impl Location {
    #[must_use]
    pub fn new(children: Vec<usize>, behavior: usize) -> Self {
        Self { children, behavior }
    }

    /// Child indices from the root down to the node holding the behavior.
    #[must_use]
    pub fn child_path(&self) -> &[usize] {
        &self.children
    }

    #[must_use]
    pub fn behavior_index(&self) -> usize {
        self.behavior
    }

    /// Nesting depth of the holding node; the root is depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children.len()
    }

    /// Walk `root` along this location and return the ancestor chain, root
    /// first, ending with the node that holds the behavior.
    ///
    /// Returns `None` if any child index or the behavior index is out of range.
    #[must_use]
    pub fn resolve<'t>(&self, root: &'t RuleNode) -> Option<Vec<&'t RuleNode>> {
        let mut chain = Vec::with_capacity(self.depth() + 1);
        let mut node = root;
        chain.push(node);
        for &idx in self.child_path() {
            node = node.children().get(idx)?;
            chain.push(node);
        }
        if self.behavior >= node.behaviors().len() {
            return None;
        }
        Some(chain)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for idx in &self.children {
            write!(f, ".children[{idx}]")?;
        }
        write!(f, ".behaviors[{}]", self.behavior)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
