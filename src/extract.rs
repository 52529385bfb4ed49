//! Walkers that collect auxiliary resource references from a rule tree.
//!
//! Each extractor finds behaviors of a fixed kind, keeps the enabled ones,
//! maps them to an identifying value and collects a set. Behaviors missing
//! their identifying value are logged and skipped.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::find::{find_behaviors, find_behaviors_any};
use crate::{
    Behavior, BehaviorKind, CloudletPolicyRef, CloudletType, CpCodeRef, EdgeWorkerRef,
    ImagePolicySetRef, Location, RuleNode, SiteShieldMapRef,
};

/// Cloudlet policies referenced by enabled behaviors of the given cloudlet
/// types.
///
/// `shared` selects the policy flavor: `None` keeps both, `Some(true)` only
/// shared policies, `Some(false)` only legacy ones.
#[must_use]
pub fn cloudlet_policies(
    tree: &RuleNode,
    types: &[CloudletType],
    shared: Option<bool>,
) -> BTreeSet<CloudletPolicyRef> {
    let kinds: Vec<BehaviorKind> = types.iter().copied().map(BehaviorKind::from).collect();
    enabled(find_behaviors_any(tree, &kinds))
        .filter_map(|(behavior, location)| {
            let policy = cloudlet_policy(behavior);
            if policy.is_none() {
                tracing::warn!(
                    location = %location,
                    behavior = behavior.name(),
                    "skipping cloudlet behavior without a policy id"
                );
            }
            policy
        })
        .filter(|policy| shared.map_or(true, |want| policy.shared == want))
        .collect()
}

/// Policies of every known cloudlet type, both flavors.
#[must_use]
pub fn all_cloudlet_policies(tree: &RuleNode) -> BTreeSet<CloudletPolicyRef> {
    cloudlet_policies(tree, &CloudletType::ALL, None)
}

/// Edge Redirector policies, optionally restricted to one flavor.
#[must_use]
pub fn edge_redirector_policies(
    tree: &RuleNode,
    shared: Option<bool>,
) -> BTreeSet<CloudletPolicyRef> {
    cloudlet_policies(tree, &[CloudletType::EdgeRedirector], shared)
}

fn cloudlet_policy(behavior: &Behavior) -> Option<CloudletPolicyRef> {
    let shared = behavior.option_bool(&["isSharedPolicy"]).unwrap_or(false);
    let id = if shared {
        behavior.option(&["cloudletSharedPolicy"])
    } else {
        behavior.option(&["cloudletPolicy", "id"])
    };
    Some(CloudletPolicyRef {
        id: id.and_then(numeric_id)?,
        shared,
    })
}

/// Edge worker ids from enabled `edgeWorker` behaviors.
#[must_use]
pub fn edge_workers(tree: &RuleNode) -> BTreeSet<EdgeWorkerRef> {
    numeric_ids(tree, &BehaviorKind::EdgeWorker, &["edgeWorkerId"])
        .map(|id| EdgeWorkerRef { id })
        .collect()
}

/// CP code ids from `cpCode` behaviors.
#[must_use]
pub fn cp_codes(tree: &RuleNode) -> BTreeSet<CpCodeRef> {
    numeric_ids(tree, &BehaviorKind::CpCode, &["value", "id"])
        .map(|id| CpCodeRef { id })
        .collect()
}

fn numeric_ids<'t>(
    tree: &'t RuleNode,
    kind: &BehaviorKind,
    path: &'t [&'t str],
) -> impl Iterator<Item = u64> + 't {
    enabled(find_behaviors(tree, kind)).filter_map(move |(behavior, location)| {
        let id = behavior.option(path).and_then(numeric_id);
        if id.is_none() {
            tracing::debug!(
                location = %location,
                behavior = behavior.name(),
                "skipping behavior without a numeric id"
            );
        }
        id
    })
}

/// Image and video policy set names from enabled image manager behaviors.
///
/// Behaviors without an explicit `policySet` get the default name
/// `{token}-{asset_id}`, suffixed `-v` for video, where the token is
/// `policyTokenDefault` or else `policyToken`.
#[must_use]
pub fn image_policy_sets(tree: &RuleNode, asset_id: Option<&str>) -> BTreeSet<ImagePolicySetRef> {
    enabled(find_behaviors_any(
        tree,
        &[BehaviorKind::ImageManager, BehaviorKind::ImageManagerVideo],
    ))
    .filter_map(|(behavior, location)| {
        let name = image_policy_set_name(behavior, asset_id);
        if name.is_none() {
            tracing::warn!(
                location = %location,
                "skipping image manager behavior: no policy set and no asset id"
            );
        }
        name.map(|name| ImagePolicySetRef { name })
    })
    .collect()
}

fn image_policy_set_name(behavior: &Behavior, asset_id: Option<&str>) -> Option<String> {
    if let Some(explicit) = behavior.option_str(&["policySet"]) {
        return Some(explicit.to_owned());
    }
    let asset_id = asset_id?;
    let token = behavior
        .option_str(&["policyTokenDefault"])
        .or_else(|| behavior.option_str(&["policyToken"]));
    let mut name = match token {
        Some(token) => format!("{token}-{asset_id}"),
        None => asset_id.to_owned(),
    };
    if behavior.kind() == &BehaviorKind::ImageManagerVideo {
        name.push_str("-v");
    }
    Some(name)
}

/// Site shield map names from `siteShield` behaviors.
#[must_use]
pub fn site_shield_maps(tree: &RuleNode) -> BTreeSet<SiteShieldMapRef> {
    enabled(find_behaviors(tree, &BehaviorKind::SiteShield))
        .filter_map(|(behavior, location)| {
            let name = behavior.option_str(&["ssmap", "value"]);
            if name.is_none() {
                tracing::warn!(location = %location, "skipping site shield without a map");
            }
            name.map(|name| SiteShieldMapRef {
                name: name.to_owned(),
            })
        })
        .collect()
}

fn enabled<'t>(
    found: Vec<(&'t Behavior, Location)>,
) -> impl Iterator<Item = (&'t Behavior, Location)> {
    found.into_iter().filter(|(behavior, _)| behavior.is_enabled())
}

/// Ids arrive either as JSON integers or as numeric strings.
fn numeric_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
