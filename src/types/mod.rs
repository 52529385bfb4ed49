mod analyzer;
mod behavior;
mod combined;
mod criterion;
mod description;
mod document;
mod error;
mod location;
mod match_expr;
mod node;
mod record;

pub use analyzer::{Analyzer, AnalyzerBuilder, DEFAULT_DEEPLINK_PREFIX};
pub use behavior::{Behavior, BehaviorKind, CloudletType};
pub use combined::CombinedCriteria;
pub use criterion::{Criterion, CriterionKind, CriterionValues, MatchKind, MatchOperator};
pub use description::PropertyDescription;
pub use document::RuleTree;
pub use error::{AnalysisError, DocumentError};
pub use location::Location;
pub use match_expr::{AND_SEPARATOR, ESCAPE, MatchExpr, MatchTerm};
pub use node::{CriteriaPolicy, RuleNode};
pub use record::{
    CloudletPolicyRef, CpCodeRef, EdgeWorkerRef, ImagePolicySetRef, LocatedOrigin, OriginRecord,
    SiteShieldMapRef,
};
