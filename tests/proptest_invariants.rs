
use std::collections::BTreeSet;

use proptest::prelude::*;
use rulewalk::{
    CriteriaPolicy, Criterion, Location, MatchExpr, MatchKind, RuleNode, collate_origins,
    combine_criteria, find_origins, find_origins_unqualified, node_alternatives,
};
use strategies::{
    arb_chain_levels, arb_path_criterion, arb_tree, arb_unconditional_tree, nest,
};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// Collating the same tree twice yields identical records in identical order.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn determinism(tree in arb_tree()) {
        let first = collate_origins(&tree).unwrap();
        for _ in 0..3 {
            let again = collate_origins(&tree).unwrap();
            prop_assert_eq!(&first, &again, "determinism violated on repeated collation");
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Record count
//
// Each located origin expands to max(1, number of alternatives) records.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn record_count_matches_alternatives(tree in arb_tree()) {
        let expected: usize = find_origins(&tree)
            .iter()
            .map(|o| combine_criteria(&tree, &o.location).unwrap().len().max(1))
            .sum();
        prop_assert_eq!(collate_origins(&tree).unwrap().len(), expected);
    }

    #[test]
    fn unqualified_is_hostname_set(tree in arb_tree()) {
        let collated: BTreeSet<String> = collate_origins(&tree)
            .unwrap()
            .iter()
            .map(|r| r.hostname().to_owned())
            .collect();
        prop_assert_eq!(collated, find_origins_unqualified(&tree));
    }

    #[test]
    fn refinements_parse(tree in arb_tree()) {
        for record in collate_origins(&tree).unwrap() {
            if let Some((_, raw)) = record.refinement() {
                let expr = MatchExpr::parse(raw).unwrap();
                prop_assert_eq!(expr.to_string(), raw);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: No criteria means no refinement
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn no_criteria_identity(tree in arb_unconditional_tree()) {
        let records = collate_origins(&tree).unwrap();
        let located = find_origins(&tree);
        prop_assert_eq!(records.len(), located.len());
        for (record, origin) in records.iter().zip(&located) {
            prop_assert!(record.is_unconditional());
            prop_assert_eq!(record.hostname(), origin.hostname.as_str());
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Within-node policy
//
// `All` yields the product of value counts, `Any` their sum.
// ---------------------------------------------------------------------------

fn node_with(criteria: &[Criterion], policy: CriteriaPolicy) -> RuleNode {
    criteria
        .iter()
        .cloned()
        .fold(RuleNode::new("r").policy(policy), RuleNode::criterion)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn all_policy_is_product(criteria in prop::collection::vec(arb_path_criterion(), 1..=3)) {
        let node = node_with(&criteria, CriteriaPolicy::All);
        let expected: usize = criteria.iter().map(|c| c.values().as_slice().len()).product();
        let alternatives = node_alternatives(&node, MatchKind::Path);
        prop_assert_eq!(alternatives.len(), expected);
        for alternative in &alternatives {
            prop_assert_eq!(MatchExpr::parse(alternative).unwrap().terms().len(), criteria.len());
        }
    }

    #[test]
    fn any_policy_is_sum(criteria in prop::collection::vec(arb_path_criterion(), 1..=3)) {
        let node = node_with(&criteria, CriteriaPolicy::Any);
        let expected: usize = criteria.iter().map(|c| c.values().as_slice().len()).sum();
        prop_assert_eq!(node_alternatives(&node, MatchKind::Path).len(), expected);
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Nesting is conjunction
//
// Every combined alternative has one term per level, drawn from that level,
// and the count is the product of the level sizes.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn nesting_is_and(levels in arb_chain_levels()) {
        let tree = nest(&levels);
        let location = Location::new(vec![0; levels.len() - 1], 0);
        let combined = combine_criteria(&tree, &location).unwrap();
        let alternatives = combined.alternatives(MatchKind::Path);

        let expected: usize = levels.iter().map(Vec::len).product();
        prop_assert_eq!(alternatives.len(), expected);

        for alternative in alternatives {
            let expr = MatchExpr::parse(alternative).unwrap();
            prop_assert_eq!(expr.terms().len(), levels.len());
            for (term, level) in expr.terms().iter().zip(&levels) {
                prop_assert!(!term.negated);
                prop_assert!(level.contains(&term.pattern));
            }
        }
    }

    #[test]
    fn first_level_varies_slowest(levels in arb_chain_levels()) {
        let tree = nest(&levels);
        let location = Location::new(vec![0; levels.len() - 1], 0);
        let combined = combine_criteria(&tree, &location).unwrap();
        let alternatives = combined.alternatives(MatchKind::Path);

        let block: usize = levels[1..].iter().map(Vec::len).product();
        for (i, alternative) in alternatives.iter().enumerate() {
            let expr = MatchExpr::parse(alternative).unwrap();
            prop_assert_eq!(&expr.terms()[0].pattern, &levels[0][i / block]);
        }
    }
}
