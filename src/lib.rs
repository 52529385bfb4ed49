mod combine;
mod error;
mod expand;
mod extract;
mod find;
mod locate;
pub mod parse;
mod types;

pub use combine::{combine_chain, combine_criteria, node_alternatives};
pub use error::RulewalkError;
pub use expand::{collate_origins, expand};
pub use extract::{
    all_cloudlet_policies, cloudlet_policies, cp_codes, edge_redirector_policies, edge_workers,
    image_policy_sets, site_shield_maps,
};
pub use find::{find_behaviors, find_behaviors_any};
pub use locate::{find_origins, find_origins_unqualified, origin_hostname};
pub use parse::ParseError;
pub use types::{
    AND_SEPARATOR, AnalysisError, Analyzer, AnalyzerBuilder, Behavior, BehaviorKind,
    CloudletPolicyRef, CloudletType, CombinedCriteria, CpCodeRef, CriteriaPolicy, Criterion,
    CriterionKind, CriterionValues, DEFAULT_DEEPLINK_PREFIX, DocumentError, EdgeWorkerRef,
    ImagePolicySetRef, LocatedOrigin, Location, MatchExpr, MatchKind, MatchOperator, MatchTerm,
    OriginRecord, PropertyDescription, RuleNode, RuleTree, SiteShieldMapRef,
};
