use super::behavior::CloudletType;
use super::description::PropertyDescription;
use super::document::RuleTree;
use super::error::AnalysisError;

/// Default prefix of the property-manager deeplink.
pub const DEFAULT_DEEPLINK_PREFIX: &str =
    "https://control.akamai.com/apps/property-manager/#/property-version/";

/// Builder for constructing an [`Analyzer`].
///
/// # Example
///
/// ```
/// use rulewalk::{AnalyzerBuilder, CloudletType, RuleTree};
///
/// let analyzer = AnalyzerBuilder::new()
///     .asset_id("10807565")
///     .cloudlet_types([CloudletType::EdgeRedirector, CloudletType::PhasedRelease])
///     .build();
///
/// let tree = RuleTree::from_json(r#"{ "rules": { "name": "default" } }"#).unwrap();
/// let description = analyzer.describe(&tree).unwrap();
/// assert!(description.origins.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder {
    asset_id: Option<String>,
    cloudlet_types: Vec<CloudletType>,
    edge_redirector_shared: Option<bool>,
    deeplink_prefix: String,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            asset_id: None,
            cloudlet_types: CloudletType::ALL.to_vec(),
            edge_redirector_shared: Some(false),
            deeplink_prefix: DEFAULT_DEEPLINK_PREFIX.to_owned(),
        }
    }
}

impl AnalyzerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Asset id used when the document does not carry its own.
    #[must_use]
    pub fn asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    /// Restrict the cloudlet policy scan to these behavior types.
    #[must_use]
    pub fn cloudlet_types(mut self, types: impl IntoIterator<Item = CloudletType>) -> Self {
        self.cloudlet_types = types.into_iter().collect();
        self
    }

    /// Policy flavor reported for Edge Redirector. `None` reports both.
    #[must_use]
    pub fn edge_redirector_shared(mut self, shared: Option<bool>) -> Self {
        self.edge_redirector_shared = shared;
        self
    }

    #[must_use]
    pub fn deeplink_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.deeplink_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Analyzer {
        let mut cloudlet_types = self.cloudlet_types;
        cloudlet_types.sort_unstable();
        cloudlet_types.dedup();
        Analyzer {
            asset_id: self.asset_id,
            cloudlet_types,
            edge_redirector_shared: self.edge_redirector_shared,
            deeplink_prefix: self.deeplink_prefix,
        }
    }
}

/// Immutable analyzer configuration. Thread-safe and designed to live behind `Arc`.
#[derive(Debug, Clone)]
pub struct Analyzer {
    asset_id: Option<String>,
    cloudlet_types: Vec<CloudletType>,
    edge_redirector_shared: Option<bool>,
    deeplink_prefix: String,
}

impl Default for Analyzer {
    fn default() -> Self {
        AnalyzerBuilder::new().build()
    }
}

impl Analyzer {
    /// Run every walker over `tree` and assemble the result.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if origin collation fails.
    pub fn describe(&self, tree: &RuleTree) -> Result<PropertyDescription, AnalysisError> {
        let rules = &tree.rules;
        let asset_id = tree.asset_id.as_deref().or(self.asset_id.as_deref());

        let description = PropertyDescription {
            id: tree.property_id.clone(),
            name: tree.property_name.clone(),
            version: tree.property_version,
            rule_format: tree.rule_format.clone(),
            origins: crate::collate_origins(rules)?,
            cloudlet_policies: crate::cloudlet_policies(rules, &self.cloudlet_types, None),
            edge_redirector_policies: crate::edge_redirector_policies(
                rules,
                self.edge_redirector_shared,
            ),
            image_manager_policy_sets: crate::image_policy_sets(rules, asset_id),
            edge_worker_ids: crate::edge_workers(rules),
            site_shield_maps: crate::site_shield_maps(rules),
            cp_codes: crate::cp_codes(rules),
            deeplink: self.deeplink(tree, asset_id),
        };

        tracing::info!(
            property = description.name.as_deref().or(description.id.as_deref()).unwrap_or("-"),
            origins = description.origins.len(),
            cloudlets = description.cloudlet_policies.len(),
            "described property"
        );
        Ok(description)
    }

    fn deeplink(&self, tree: &RuleTree, asset_id: Option<&str>) -> Option<String> {
        let asset_id = asset_id?;
        let version = tree.property_version?;
        let group_id = tree.group_id.as_deref()?;
        Some(format!(
            "{}{asset_id}/{version}/edit?gid={group_id}",
            self.deeplink_prefix
        ))
    }

    #[must_use]
    pub fn cloudlet_types(&self) -> &[CloudletType] {
        &self.cloudlet_types
    }
}
