use crate::types::AND_SEPARATOR;
use crate::{
    AnalysisError, CombinedCriteria, CriteriaPolicy, CriterionValues, Location, MatchKind,
    RuleNode,
};

/// Combine the criteria of every node on the ancestor chain of `location`
/// into per-kind alternative match expressions.
///
/// Within one node, criteria of the same kind follow the node's
/// [`CriteriaPolicy`]. Across nesting levels, contributions are always
/// AND-ed, with earlier ancestors varying slowest. Nodes without criteria of
/// a kind are transparent for that kind.
///
/// # Errors
///
/// Returns [`AnalysisError::LocationNotFound`] if `location` does not
/// resolve inside `tree`.
pub fn combine_criteria(
    tree: &RuleNode,
    location: &Location,
) -> Result<CombinedCriteria, AnalysisError> {
    let chain = location
        .resolve(tree)
        .ok_or_else(|| AnalysisError::LocationNotFound {
            location: location.to_string(),
        })?;
    Ok(combine_chain(&chain))
}

/// Combine an already-resolved ancestor chain, root first.
#[must_use]
pub fn combine_chain(chain: &[&RuleNode]) -> CombinedCriteria {
    MatchKind::ALL
        .into_iter()
        .fold(CombinedCriteria::new(), |combined, kind| {
            let levels: Vec<Vec<String>> = chain
                .iter()
                .map(|node| node_alternatives(node, kind))
                .filter(|alternatives| !alternatives.is_empty())
                .collect();
            combined.with(kind, product_joined(&levels))
        })
}

/// A single node's own contribution for `kind`.
///
/// Each matching criterion yields its values (negated ones `!`-prefixed).
/// Several criteria are combined per the node's policy: `All` takes the
/// cartesian product joined with `" AND "`, `Any` concatenates.
#[must_use]
pub fn node_alternatives(node: &RuleNode, kind: MatchKind) -> Vec<String> {
    let per_criterion: Vec<Vec<String>> = node
        .criteria()
        .iter()
        .filter(|criterion| criterion.match_kind() == Some(kind))
        .filter_map(|criterion| {
            if criterion.values() == &CriterionValues::Missing {
                if kind == MatchKind::ConditionalOrigin {
                    tracing::warn!(
                        rule = node.name(),
                        "conditional origin criterion has no originId"
                    );
                } else {
                    tracing::debug!(rule = node.name(), kind = %kind, "criterion has no values");
                }
                return None;
            }
            let alternatives = criterion.alternatives();
            (!alternatives.is_empty()).then_some(alternatives)
        })
        .collect();

    match node.criteria_policy() {
        CriteriaPolicy::All => product_joined(&per_criterion),
        CriteriaPolicy::Any => per_criterion.concat(),
    }
}

/// Cartesian product of `lists`, each combination joined with `" AND "`.
/// The first list varies slowest. An empty input yields no alternatives.
fn product_joined(lists: &[Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    rest.iter().fold(first.clone(), |acc, list| {
        acc.iter()
            .flat_map(|prefix| {
                list.iter()
                    .map(move |value| format!("{prefix}{AND_SEPARATOR}{value}"))
            })
            .collect()
    })
}
