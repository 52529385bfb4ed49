use std::collections::BTreeSet;

use crate::find::find_behaviors;
use crate::{Behavior, BehaviorKind, LocatedOrigin, RuleNode};

/// Option paths tried, in order, to resolve an origin's hostname: customer
/// origin, storage origin, then live-media origin.
const HOSTNAME_SOURCES: [&[&str]; 3] = [
    &["hostname"],
    &["netStorage", "downloadDomainName"],
    &["mslorigin"],
];

/// Resolve the backend hostname of an `origin` behavior.
///
/// The option shape is chosen by the first source key present, whatever its
/// value. Returns `None` if no source key is present or the chosen one does
/// not hold a string.
#[must_use]
pub fn origin_hostname(behavior: &Behavior) -> Option<&str> {
    let path = HOSTNAME_SOURCES.iter().find(|path| {
        path.first()
            .is_some_and(|key| behavior.options().contains_key(*key))
    })?;
    behavior.option_str(path)
}

/// Find every resolvable `origin` behavior with its location, in tree order.
///
/// Origins whose hostname cannot be resolved are logged and skipped.
#[must_use]
pub fn find_origins(tree: &RuleNode) -> Vec<LocatedOrigin> {
    find_behaviors(tree, &BehaviorKind::Origin)
        .into_iter()
        .filter_map(|(behavior, location)| match origin_hostname(behavior) {
            Some(hostname) => Some(LocatedOrigin {
                hostname: hostname.to_owned(),
                location,
            }),
            None => {
                tracing::warn!(
                    location = %location,
                    origin_type = behavior.option_str(&["originType"]).unwrap_or("-"),
                    "skipping origin with no resolvable hostname"
                );
                None
            }
        })
        .collect()
}

/// The distinct origin hostnames in the tree, without locations or criteria.
#[must_use]
pub fn find_origins_unqualified(tree: &RuleNode) -> BTreeSet<String> {
    let mut hostnames = BTreeSet::new();
    collect_hostnames(tree, &mut hostnames);
    hostnames
}

fn collect_hostnames(node: &RuleNode, out: &mut BTreeSet<String>) {
    for behavior in node.behaviors() {
        if behavior.kind() != &BehaviorKind::Origin {
            continue;
        }
        match origin_hostname(behavior) {
            Some(hostname) => {
                out.insert(hostname.to_owned());
            }
            None => tracing::debug!("skipping origin with no resolvable hostname"),
        }
    }
    for child in node.children() {
        collect_hostnames(child, out);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn origin(options: serde_json::Value) -> Behavior {
        Behavior::new("origin", options)
    }

    #[test]
    fn hostname_priority() {
        let customer = origin(json!({
            "originType": "CUSTOMER",
            "hostname": "customer-hostname",
            "netStorage": { "downloadDomainName": "ignored" }
        }));
        assert_eq!(origin_hostname(&customer), Some("customer-hostname"));

        let storage = origin(json!({
            "originType": "NET_STORAGE",
            "netStorage": { "downloadDomainName": "netstorage-downloaddomainname" },
            "mslorigin": "ignored"
        }));
        assert_eq!(
            origin_hostname(&storage),
            Some("netstorage-downloaddomainname")
        );

        let media = origin(json!({ "originType": "MEDIA_SERVICE_LIVE", "mslorigin": "mslorigin" }));
        assert_eq!(origin_hostname(&media), Some("mslorigin"));
    }

    #[test]
    fn present_source_key_decides_shape() {
        let null_hostname = origin(json!({
            "hostname": null,
            "netStorage": { "downloadDomainName": "ns.example" }
        }));
        assert_eq!(origin_hostname(&null_hostname), None);

        let bad_storage = origin(json!({
            "netStorage": { "cpCode": 1 },
            "mslorigin": "msl.example"
        }));
        assert_eq!(origin_hostname(&bad_storage), None);
    }

    #[test]
    fn unresolvable_hostname() {
        assert_eq!(
            origin_hostname(&origin(json!({ "originType": "EDGE_LOAD_BALANCING_ORIGIN_GROUP" }))),
            None
        );
        assert_eq!(origin_hostname(&origin(json!({ "hostname": null }))), None);
        assert_eq!(origin_hostname(&origin(json!({ "netStorage": {} }))), None);
    }

    #[test]
    fn find_origins_skips_unresolvable() {
        let tree = RuleNode::new("default")
            .behavior(origin(json!({ "originType": "CUSTOMER" })))
            .child(RuleNode::new("a").behavior(Behavior::origin("a.example.com")));
        let found = find_origins(&tree);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].hostname, "a.example.com");
        assert_eq!(found[0].location.to_string(), "$.children[0].behaviors[0]");
    }

    #[test]
    fn unqualified_dedups() {
        let tree = RuleNode::new("default")
            .behavior(Behavior::origin("customer-hostname"))
            .behavior(origin(json!({
                "originType": "NET_STORAGE",
                "netStorage": { "downloadDomainName": "netstorage-downloaddomainname" }
            })))
            .behavior(origin(json!({
                "originType": "MEDIA_SERVICE_LIVE",
                "mslorigin": "mslorigin"
            })))
            .behavior(Behavior::new("other", json!({})))
            .child(RuleNode::new("a").behavior(Behavior::origin("customer-hostname")))
            .child(RuleNode::new("b"));

        let hostnames = find_origins_unqualified(&tree);
        assert_eq!(
            hostnames.into_iter().collect::<Vec<_>>(),
            ["customer-hostname", "mslorigin", "netstorage-downloaddomainname"]
        );
    }
}
