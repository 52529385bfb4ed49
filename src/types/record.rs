use std::fmt;

use serde::Serialize;

use super::criterion::MatchKind;
use super::location::Location;
use super::match_expr::MatchExpr;
use crate::parse::ParseError;

/// An origin behavior found in the tree, with its resolved hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocatedOrigin {
    pub hostname: String,
    pub location: Location,
}

/// One flattened origin: the backend hostname and at most one request
/// condition under which it is selected.
///
/// A record with no condition is an unconditional origin at its tree location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OriginRecord {
    hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditional_origin_id: Option<String>,
}

impl OriginRecord {
    /// An unconditional origin record.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            path: None,
            matched_hostname: None,
            conditional_origin_id: None,
        }
    }

    /// A record refined by one match expression of the given kind.
    #[must_use]
    pub fn refined(hostname: impl Into<String>, kind: MatchKind, expr: impl Into<String>) -> Self {
        let mut record = Self::new(hostname);
        let expr = Some(expr.into());
        match kind {
            MatchKind::Path => record.path = expr,
            MatchKind::Hostname => record.matched_hostname = expr,
            MatchKind::ConditionalOrigin => record.conditional_origin_id = expr,
        }
        record
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Request path match expression.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Request hostname match expression (not the origin's own hostname).
    #[must_use]
    pub fn matched_hostname(&self) -> Option<&str> {
        self.matched_hostname.as_deref()
    }

    #[must_use]
    pub fn conditional_origin_id(&self) -> Option<&str> {
        self.conditional_origin_id.as_deref()
    }

    /// The refinement kind and its raw expression, if any.
    #[must_use]
    pub fn refinement(&self) -> Option<(MatchKind, &str)> {
        self.path
            .as_deref()
            .map(|p| (MatchKind::Path, p))
            .or_else(|| {
                self.matched_hostname
                    .as_deref()
                    .map(|h| (MatchKind::Hostname, h))
            })
            .or_else(|| {
                self.conditional_origin_id
                    .as_deref()
                    .map(|c| (MatchKind::ConditionalOrigin, c))
            })
    }

    #[must_use]
    pub fn is_unconditional(&self) -> bool {
        self.refinement().is_none()
    }

    /// Parse the refinement into structured terms.
    ///
    /// Returns `Ok(None)` for unconditional records.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the stored expression is malformed.
    pub fn condition(&self) -> Result<Option<MatchExpr>, ParseError> {
        self.refinement()
            .map(|(_, expr)| MatchExpr::parse(expr))
            .transpose()
    }
}

impl fmt::Display for OriginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)?;
        match self.refinement() {
            Some((kind, expr)) => write!(f, " [{kind}: {expr}]"),
            None => Ok(()),
        }
    }
}

/// A cloudlet policy referenced by a cloudlet behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CloudletPolicyRef {
    pub id: u64,
    pub shared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeWorkerRef {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CpCodeRef {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImagePolicySetRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SiteShieldMapRef {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconditional_record() {
        let r = OriginRecord::new("example.com");
        assert_eq!(r.hostname(), "example.com");
        assert!(r.is_unconditional());
        assert_eq!(r.to_string(), "example.com");
        assert_eq!(r.condition().unwrap(), None);
    }

    #[test]
    fn refined_sets_exactly_one_field() {
        let r = OriginRecord::refined("o.example.com", MatchKind::Hostname, "www.example.com");
        assert_eq!(r.path(), None);
        assert_eq!(r.matched_hostname(), Some("www.example.com"));
        assert_eq!(r.conditional_origin_id(), None);
        assert_eq!(r.refinement(), Some((MatchKind::Hostname, "www.example.com")));

        let r = OriginRecord::refined("o.example.com", MatchKind::ConditionalOrigin, "MAINTENANCE");
        assert_eq!(r.conditional_origin_id(), Some("MAINTENANCE"));
        assert_eq!(r.to_string(), "o.example.com [cloudletsOrigin: MAINTENANCE]");
    }

    #[test]
    fn condition_parses_refinement() {
        let r = OriginRecord::refined(
            "e.example.com",
            MatchKind::Path,
            "/community AND !/community/*/amp",
        );
        let expr = r.condition().unwrap().unwrap();
        assert_eq!(expr.terms().len(), 2);
        assert!(expr.terms()[1].negated);
    }

    #[test]
    fn serializes_set_fields_only() {
        let r = OriginRecord::refined("e.example.com", MatchKind::Path, "/community");
        assert_eq!(
            serde_json::to_value(&r).unwrap(),
            serde_json::json!({ "hostname": "e.example.com", "path": "/community" })
        );
    }
}
