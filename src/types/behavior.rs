use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// The cloudlet behaviors that reference a cloudlet policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CloudletType {
    ApplicationLoadBalancer,
    ApiPrioritization,
    AudienceSegmentation,
    PhasedRelease,
    EdgeRedirector,
    ForwardRewrite,
    RequestControl,
    VisitorPrioritization,
    VirtualWaitingRoom,
}

impl CloudletType {
    pub const ALL: [CloudletType; 9] = [
        CloudletType::ApplicationLoadBalancer,
        CloudletType::ApiPrioritization,
        CloudletType::AudienceSegmentation,
        CloudletType::PhasedRelease,
        CloudletType::EdgeRedirector,
        CloudletType::ForwardRewrite,
        CloudletType::RequestControl,
        CloudletType::VisitorPrioritization,
        CloudletType::VirtualWaitingRoom,
    ];

    #[must_use]
    pub fn behavior_name(self) -> &'static str {
        match self {
            CloudletType::ApplicationLoadBalancer => "applicationLoadBalancer",
            CloudletType::ApiPrioritization => "apiPrioritization",
            CloudletType::AudienceSegmentation => "audienceSegmentation",
            CloudletType::PhasedRelease => "phasedRelease",
            CloudletType::EdgeRedirector => "edgeRedirector",
            CloudletType::ForwardRewrite => "forwardRewrite",
            CloudletType::RequestControl => "requestControl",
            CloudletType::VisitorPrioritization => "visitorPrioritization",
            CloudletType::VirtualWaitingRoom => "virtualWaitingRoom",
        }
    }
}

/// Discriminator of a behavior.
///
/// Only the behaviors the walkers look for get their own variant; every other
/// name is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Origin,
    SiteShield,
    CpCode,
    EdgeWorker,
    ImageManager,
    ImageManagerVideo,
    Cloudlet(CloudletType),
    Other(String),
}

impl BehaviorKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "origin" => BehaviorKind::Origin,
            "siteShield" => BehaviorKind::SiteShield,
            "cpCode" => BehaviorKind::CpCode,
            "edgeWorker" => BehaviorKind::EdgeWorker,
            "imageManager" => BehaviorKind::ImageManager,
            "imageManagerVideo" => BehaviorKind::ImageManagerVideo,
            other => CloudletType::ALL
                .into_iter()
                .find(|t| t.behavior_name() == other)
                .map_or_else(|| BehaviorKind::Other(other.to_owned()), BehaviorKind::Cloudlet),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            BehaviorKind::Origin => "origin",
            BehaviorKind::SiteShield => "siteShield",
            BehaviorKind::CpCode => "cpCode",
            BehaviorKind::EdgeWorker => "edgeWorker",
            BehaviorKind::ImageManager => "imageManager",
            BehaviorKind::ImageManagerVideo => "imageManagerVideo",
            BehaviorKind::Cloudlet(t) => t.behavior_name(),
            BehaviorKind::Other(name) => name,
        }
    }
}

impl From<&str> for BehaviorKind {
    fn from(name: &str) -> Self {
        BehaviorKind::from_name(name)
    }
}

impl From<CloudletType> for BehaviorKind {
    fn from(t: CloudletType) -> Self {
        BehaviorKind::Cloudlet(t)
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, parameterized action attached to a rule node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBehavior")]
pub struct Behavior {
    kind: BehaviorKind,
    options: Map<String, Value>,
}

impl Behavior {
    /// Create a behavior. Non-object `options` are treated as empty.
    #[must_use]
    pub fn new(kind: impl Into<BehaviorKind>, options: Value) -> Self {
        Self {
            kind: kind.into(),
            options: match options {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    /// A customer `origin` behavior forwarding to `hostname`.
    #[must_use]
    pub fn origin(hostname: &str) -> Self {
        Self::new(
            BehaviorKind::Origin,
            serde_json::json!({ "originType": "CUSTOMER", "hostname": hostname }),
        )
    }

    #[must_use]
    pub fn kind(&self) -> &BehaviorKind {
        &self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Look up a nested option by key path, e.g. `["netStorage", "downloadDomainName"]`.
    #[must_use]
    pub fn option(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.options.get(*first)?, |value, key| value.get(*key))
    }

    /// A nested string option; `None` if absent or not a string.
    #[must_use]
    pub fn option_str(&self, path: &[&str]) -> Option<&str> {
        self.option(path).and_then(Value::as_str)
    }

    /// A nested boolean option; `None` if absent or not a boolean.
    #[must_use]
    pub fn option_bool(&self, path: &[&str]) -> Option<bool> {
        self.option(path).and_then(Value::as_bool)
    }

    /// Whether the behavior is switched on. Behaviors without an `enabled`
    /// option are always on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.option_bool(&["enabled"]).unwrap_or(true)
    }
}

#[derive(Deserialize)]
struct RawBehavior {
    name: String,
    #[serde(default)]
    options: Option<Map<String, Value>>,
}

impl From<RawBehavior> for Behavior {
    fn from(raw: RawBehavior) -> Self {
        Self {
            kind: BehaviorKind::from_name(&raw.name),
            options: raw.options.unwrap_or_default(),
        }
    }
}
