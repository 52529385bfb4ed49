use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::record::{
    CloudletPolicyRef, CpCodeRef, EdgeWorkerRef, ImagePolicySetRef, OriginRecord,
    SiteShieldMapRef,
};

/// Everything the analyzer extracts from one property rule tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescription {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<u64>,
    pub rule_format: Option<String>,
    /// Flattened origins in tree order, duplicates kept.
    pub origins: Vec<OriginRecord>,
    pub cloudlet_policies: BTreeSet<CloudletPolicyRef>,
    pub edge_redirector_policies: BTreeSet<CloudletPolicyRef>,
    pub image_manager_policy_sets: BTreeSet<ImagePolicySetRef>,
    pub edge_worker_ids: BTreeSet<EdgeWorkerRef>,
    pub site_shield_maps: BTreeSet<SiteShieldMapRef>,
    pub cp_codes: BTreeSet<CpCodeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deeplink: Option<String>,
}

impl PropertyDescription {
    /// Distinct origin hostnames across all records.
    #[must_use]
    pub fn origin_hostnames(&self) -> BTreeSet<&str> {
        self.origins.iter().map(OriginRecord::hostname).collect()
    }
}

impl fmt::Display for PropertyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{}: {} origin records ({} hosts), {} cloudlet policies, {} cp codes, \
             {} edge workers, {} image policy sets, {} site shield maps",
            self.name.as_deref().or(self.id.as_deref()).unwrap_or("<unnamed>"),
            self.version.map_or_else(|| "?".to_owned(), |v| v.to_string()),
            self.origins.len(),
            self.origin_hostnames().len(),
            self.cloudlet_policies.len(),
            self.cp_codes.len(),
            self.edge_worker_ids.len(),
            self.image_manager_policy_sets.len(),
            self.site_shield_maps.len(),
        )
    }
}
