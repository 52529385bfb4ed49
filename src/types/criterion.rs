use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::match_expr::MatchTerm;

/// The criterion kinds that refine which requests reach an origin.
///
/// Ordering is the output order used by the expander: path records first,
/// then request-hostname records, then conditional-origin records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Path,
    Hostname,
    ConditionalOrigin,
}

impl MatchKind {
    pub const ALL: [MatchKind; 3] = [
        MatchKind::Path,
        MatchKind::Hostname,
        MatchKind::ConditionalOrigin,
    ];

    /// The criterion `name` this kind is decoded from.
    #[must_use]
    pub fn criterion_name(self) -> &'static str {
        match self {
            MatchKind::Path => "path",
            MatchKind::Hostname => "hostname",
            MatchKind::ConditionalOrigin => "cloudletsOrigin",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.criterion_name())
    }
}

/// Discriminator of a criterion. Kinds the engine does not combine are kept
/// under `Other` with their original name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    Match(MatchKind),
    Other(String),
}

impl CriterionKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        MatchKind::ALL
            .into_iter()
            .find(|kind| kind.criterion_name() == name)
            .map_or_else(|| CriterionKind::Other(name.to_owned()), CriterionKind::Match)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CriterionKind::Match(kind) => kind.criterion_name(),
            CriterionKind::Other(name) => name,
        }
    }
}

impl From<MatchKind> for CriterionKind {
    fn from(kind: MatchKind) -> Self {
        CriterionKind::Match(kind)
    }
}

/// `options.matchOperator` of a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchOperator {
    MatchesOneOf,
    DoesNotMatchOneOf,
    IsOneOf,
    IsNotOneOf,
    Other(String),
}

impl MatchOperator {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "MATCHES_ONE_OF" => MatchOperator::MatchesOneOf,
            "DOES_NOT_MATCH_ONE_OF" => MatchOperator::DoesNotMatchOneOf,
            "IS_ONE_OF" => MatchOperator::IsOneOf,
            "IS_NOT_ONE_OF" => MatchOperator::IsNotOneOf,
            other => MatchOperator::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MatchOperator::MatchesOneOf => "MATCHES_ONE_OF",
            MatchOperator::DoesNotMatchOneOf => "DOES_NOT_MATCH_ONE_OF",
            MatchOperator::IsOneOf => "IS_ONE_OF",
            MatchOperator::IsNotOneOf => "IS_NOT_ONE_OF",
            MatchOperator::Other(name) => name,
        }
    }

    /// Whether values under this operator are emitted with a `!` prefix.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            MatchOperator::DoesNotMatchOneOf | MatchOperator::IsNotOneOf
        )
    }

    /// The negative counterpart of a positive operator.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            MatchOperator::MatchesOneOf => MatchOperator::DoesNotMatchOneOf,
            MatchOperator::DoesNotMatchOneOf => MatchOperator::MatchesOneOf,
            MatchOperator::IsOneOf => MatchOperator::IsNotOneOf,
            MatchOperator::IsNotOneOf => MatchOperator::IsOneOf,
            MatchOperator::Other(name) => MatchOperator::Other(name.clone()),
        }
    }
}

/// Candidate values carried by a criterion.
///
/// Path and hostname criteria carry a list under `options.values`.
/// Conditional-origin criteria carry one id under `options.originId`.
/// The two shapes are decoded separately and never substituted for each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionValues {
    List(Vec<String>),
    OriginId(String),
    Missing,
}

impl CriterionValues {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            CriterionValues::List(values) => values,
            CriterionValues::OriginId(id) => std::slice::from_ref(id),
            CriterionValues::Missing => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// A matching condition attached to a rule node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCriterion")]
pub struct Criterion {
    kind: CriterionKind,
    values: CriterionValues,
    operator: Option<MatchOperator>,
    case_sensitive: Option<bool>,
}

impl Criterion {
    /// A `path` criterion using `MATCHES_ONE_OF`.
    #[must_use]
    pub fn path<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::list(MatchKind::Path, values, MatchOperator::MatchesOneOf)
    }

    /// A request `hostname` criterion using `IS_ONE_OF`.
    #[must_use]
    pub fn hostname<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::list(MatchKind::Hostname, values, MatchOperator::IsOneOf)
    }

    /// A `cloudletsOrigin` criterion selecting one conditional origin id.
    #[must_use]
    pub fn conditional_origin(origin_id: impl Into<String>) -> Self {
        Self {
            kind: CriterionKind::Match(MatchKind::ConditionalOrigin),
            values: CriterionValues::OriginId(origin_id.into()),
            operator: None,
            case_sensitive: None,
        }
    }

    /// A criterion of a kind the engine does not combine.
    #[must_use]
    pub fn other<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: CriterionKind::Other(name.to_owned()),
            values: CriterionValues::List(values.into_iter().map(Into::into).collect()),
            operator: Some(MatchOperator::IsOneOf),
            case_sensitive: None,
        }
    }

    fn list<I, S>(kind: MatchKind, values: I, operator: MatchOperator) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: CriterionKind::Match(kind),
            values: CriterionValues::List(values.into_iter().map(Into::into).collect()),
            operator: Some(operator),
            case_sensitive: Some(false),
        }
    }

    /// Replace the match operator.
    #[must_use]
    pub fn with_operator(mut self, operator: MatchOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Flip the operator to its negative counterpart.
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.operator = Some(
            self.operator
                .as_ref()
                .map_or(MatchOperator::DoesNotMatchOneOf, MatchOperator::negate),
        );
        self
    }

    #[must_use]
    pub fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    /// The match kind, if this criterion takes part in origin refinement.
    #[must_use]
    pub fn match_kind(&self) -> Option<MatchKind> {
        match self.kind {
            CriterionKind::Match(kind) => Some(kind),
            CriterionKind::Other(_) => None,
        }
    }

    #[must_use]
    pub fn values(&self) -> &CriterionValues {
        &self.values
    }

    #[must_use]
    pub fn operator(&self) -> Option<&MatchOperator> {
        self.operator.as_ref()
    }

    #[must_use]
    pub fn case_sensitive(&self) -> Option<bool> {
        self.case_sensitive
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.operator.as_ref().is_some_and(MatchOperator::is_negative)
    }

    /// Values as they appear in match expressions, `!`-prefixed under a
    /// negative operator. Empty values are dropped.
    pub(crate) fn alternatives(&self) -> Vec<String> {
        let negative = self.is_negative();
        self.values
            .as_slice()
            .iter()
            .filter(|value| !value.is_empty())
            .map(|value| MatchTerm::new(value.as_str(), negative).to_string())
            .collect()
    }
}

#[derive(Deserialize)]
struct RawCriterion {
    name: String,
    #[serde(default)]
    options: Option<Map<String, Value>>,
}

impl From<RawCriterion> for Criterion {
    fn from(raw: RawCriterion) -> Self {
        let options = raw.options.unwrap_or_default();
        let kind = CriterionKind::from_name(&raw.name);

        let values = match kind {
            CriterionKind::Match(MatchKind::ConditionalOrigin) => options
                .get("originId")
                .and_then(Value::as_str)
                .map_or(CriterionValues::Missing, |id| {
                    CriterionValues::OriginId(id.to_owned())
                }),
            CriterionKind::Match(_) | CriterionKind::Other(_) => options
                .get("values")
                .and_then(Value::as_array)
                .map_or(CriterionValues::Missing, |values| {
                    CriterionValues::List(
                        values
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect(),
                    )
                }),
        };

        Self {
            kind,
            values,
            operator: options
                .get("matchOperator")
                .and_then(Value::as_str)
                .map(MatchOperator::from_name),
            case_sensitive: options.get("matchCaseSensitive").and_then(Value::as_bool),
        }
    }
}
