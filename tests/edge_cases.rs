use rulewalk::{
    AnalysisError, Behavior, CriteriaPolicy, Criterion, Location, MatchKind, MatchOperator,
    OriginRecord, RuleNode, collate_origins, combine_criteria, find_origins,
};
use serde_json::json;

fn origin(hostname: &str) -> Behavior {
    Behavior::origin(hostname)
}

#[test]
fn empty_tree_has_no_origins() {
    assert!(collate_origins(&RuleNode::default()).unwrap().is_empty());
}

#[test]
fn criteria_on_the_holder_node_apply() {
    let tree = RuleNode::new("default")
        .criterion(Criterion::hostname(["www.example.com"]))
        .behavior(origin("o.example.com"));
    assert_eq!(
        collate_origins(&tree).unwrap(),
        [OriginRecord::refined("o.example.com", MatchKind::Hostname, "www.example.com")]
    );
}

#[test]
fn descendants_do_not_refine_ancestors() {
    let tree = RuleNode::new("default")
        .behavior(origin("root.example.com"))
        .child(RuleNode::new("child").criterion(Criterion::path(["/child"])));
    assert_eq!(
        collate_origins(&tree).unwrap(),
        [OriginRecord::new("root.example.com")]
    );
}

#[test]
fn deeply_nested_chain() {
    let mut node = RuleNode::new("level25")
        .criterion(Criterion::path(["/25"]))
        .behavior(origin("deep.example.com"));
    for i in (0..25).rev() {
        node = RuleNode::new(format!("level{i}"))
            .criterion(Criterion::path([format!("/{i}")]))
            .child(node);
    }
    let records = collate_origins(&node).unwrap();
    assert_eq!(records.len(), 1);
    let expected: Vec<String> = (0..=25).map(|i| format!("/{i}")).collect();
    assert_eq!(records[0].path(), Some(expected.join(" AND ").as_str()));
}

#[test]
fn same_origin_in_sibling_rules() {
    let tree = RuleNode::new("default")
        .child(
            RuleNode::new("a")
                .criterion(Criterion::path(["/a"]))
                .behavior(origin("o.example.com")),
        )
        .child(
            RuleNode::new("b")
                .criterion(Criterion::path(["/b"]))
                .behavior(origin("o.example.com")),
        );
    assert_eq!(
        collate_origins(&tree).unwrap(),
        [
            OriginRecord::refined("o.example.com", MatchKind::Path, "/a"),
            OriginRecord::refined("o.example.com", MatchKind::Path, "/b"),
        ]
    );
}

#[test]
fn multiple_origins_on_one_node() {
    let tree = RuleNode::new("default")
        .criterion(Criterion::path(["/x"]))
        .behavior(origin("first.example.com"))
        .behavior(origin("second.example.com"));
    let hostnames: Vec<String> = collate_origins(&tree)
        .unwrap()
        .iter()
        .map(|r| r.hostname().to_owned())
        .collect();
    assert_eq!(hostnames, ["first.example.com", "second.example.com"]);
}

#[test]
fn unresolvable_origin_produces_no_record() {
    let tree = RuleNode::new("default")
        .behavior(Behavior::new(
            "origin",
            json!({ "originType": "EDGE_LOAD_BALANCING_ORIGIN_GROUP" }),
        ))
        .behavior(Behavior::new("origin", json!({ "hostname": 42 })));
    assert!(find_origins(&tree).is_empty());
    assert!(collate_origins(&tree).unwrap().is_empty());
}

#[test]
fn mixed_policy_chain() {
    let tree = RuleNode::new("default")
        .criterion(Criterion::path(["/a", "/b"]))
        .criterion(Criterion::path(["/1"]))
        .policy(CriteriaPolicy::All)
        .child(
            RuleNode::new("leaf")
                .criterion(Criterion::path(["/x"]))
                .criterion(Criterion::path(["/y"]))
                .policy(CriteriaPolicy::Any)
                .behavior(origin("o.example.com")),
        );
    let combined = combine_criteria(&tree, &Location::new(vec![0], 0)).unwrap();
    assert_eq!(
        combined.alternatives(MatchKind::Path),
        [
            "/a AND /1 AND /x",
            "/a AND /1 AND /y",
            "/b AND /1 AND /x",
            "/b AND /1 AND /y",
        ]
    );
}

#[test]
fn negation_applies_per_value() {
    let tree = RuleNode::new("default")
        .criterion(
            Criterion::path(["/a", "/b"]).with_operator(MatchOperator::DoesNotMatchOneOf),
        )
        .behavior(origin("o.example.com"));
    let paths: Vec<Option<String>> = collate_origins(&tree)
        .unwrap()
        .iter()
        .map(|r| r.path().map(str::to_owned))
        .collect();
    assert_eq!(paths, [Some("!/a".to_owned()), Some("!/b".to_owned())]);
}

#[test]
fn unknown_operator_is_not_negated() {
    let tree = RuleNode::new("default")
        .criterion(
            Criterion::path(["/a"]).with_operator(MatchOperator::from_name("MATCHES_REGEX")),
        )
        .behavior(origin("o.example.com"));
    assert_eq!(collate_origins(&tree).unwrap()[0].path(), Some("/a"));
}

#[test]
fn location_beyond_behaviors_is_an_error() {
    let tree = RuleNode::new("default").behavior(origin("o.example.com"));
    assert_eq!(
        combine_criteria(&tree, &Location::new(vec![], 1)).unwrap_err(),
        AnalysisError::LocationNotFound {
            location: "$.behaviors[1]".into()
        }
    );
}
