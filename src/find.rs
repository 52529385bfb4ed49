use crate::{Behavior, BehaviorKind, Location, RuleNode};

/// Collect every behavior of `kind` in the tree, in pre-order: a node's own
/// behaviors come before its children's, and children are visited in order.
#[must_use]
pub fn find_behaviors<'t>(
    tree: &'t RuleNode,
    kind: &BehaviorKind,
) -> Vec<(&'t Behavior, Location)> {
    find_behaviors_any(tree, std::slice::from_ref(kind))
}

/// Like [`find_behaviors`], matching any of `kinds`. Results stay in tree
/// order regardless of the order of `kinds`.
#[must_use]
pub fn find_behaviors_any<'t>(
    tree: &'t RuleNode,
    kinds: &[BehaviorKind],
) -> Vec<(&'t Behavior, Location)> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    walk(tree, kinds, &mut path, &mut found);
    found
}

fn walk<'t>(
    node: &'t RuleNode,
    kinds: &[BehaviorKind],
    path: &mut Vec<usize>,
    found: &mut Vec<(&'t Behavior, Location)>,
) {
    for (idx, behavior) in node.behaviors().iter().enumerate() {
        if kinds.contains(behavior.kind()) {
            found.push((behavior, Location::new(path.clone(), idx)));
        }
    }
    for (idx, child) in node.children().iter().enumerate() {
        path.push(idx);
        walk(child, kinds, path, found);
        path.pop();
    }
}
