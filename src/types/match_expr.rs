use std::fmt;

use serde::Serialize;

use crate::parse::ParseError;

/// Separator used between conjuncts of an emitted match expression.
pub const AND_SEPARATOR: &str = " AND ";

/// Prefix that marks a leading `!` or `\` in a pattern as literal.
pub const ESCAPE: char = '\\';

/// One conjunct of a match expression: a pattern, possibly negated.
///
/// Renders as `[!][\]pattern`. The escape is written only when the pattern
/// itself starts with `!` or `\`, so a literal leading `!` never reads back
/// as a negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchTerm {
    pub negated: bool,
    pub pattern: String,
}

impl MatchTerm {
    #[must_use]
    pub fn new(pattern: impl Into<String>, negated: bool) -> Self {
        Self {
            negated,
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for MatchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        if self.pattern.starts_with(|c: char| c == '!' || c == ESCAPE) {
            write!(f, "{ESCAPE}")?;
        }
        f.write_str(&self.pattern)
    }
}

/// Structured form of a `"a AND !b"` match expression, as found on
/// [`OriginRecord`](crate::OriginRecord) refinements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchExpr {
    terms: Vec<MatchTerm>,
}

impl MatchExpr {
    pub(crate) fn new(terms: Vec<MatchTerm>) -> Self {
        Self { terms }
    }

    /// Parse an emitted match expression.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for empty input, an empty term between
    /// separators, or a `!` with no pattern after it.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::parse::parse(input)
    }

    /// Conjuncts in the order they appear, outermost rule first.
    #[must_use]
    pub fn terms(&self) -> &[MatchTerm] {
        &self.terms
    }

    /// Patterns that must match.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(|t| !t.negated)
            .map(|t| t.pattern.as_str())
    }

    /// Patterns that must not match.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(|t| t.negated)
            .map(|t| t.pattern.as_str())
    }
}

impl fmt::Display for MatchExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(AND_SEPARATOR)?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
