use winnow::combinator::{alt, cut_err, opt, separated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{rest, take_until};

use crate::types::{AND_SEPARATOR, ESCAPE};
use crate::{MatchExpr, MatchTerm};

// -- Terms ------------------------------------------------------------------

/// Everything up to the next separator, or the rest of the input for the
/// last term. Never empty.
fn pattern<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        take_until(1.., AND_SEPARATOR),
        rest.verify(|s: &str| !s.is_empty()),
    ))
    .context(StrContext::Expected(StrContextValue::Description("pattern")))
    .parse_next(input)
}

fn term(input: &mut &str) -> ModalResult<MatchTerm> {
    let negated = opt('!').parse_next(input)?.is_some();
    opt(ESCAPE).parse_next(input)?;
    let pattern = cut_err(pattern).parse_next(input)?;
    Ok(MatchTerm::new(pattern, negated))
}

// -- Expressions ------------------------------------------------------------

pub(super) fn match_expr(input: &mut &str) -> ModalResult<MatchExpr> {
    let terms: Vec<MatchTerm> = separated(1.., term, AND_SEPARATOR).parse_next(input)?;
    Ok(MatchExpr::new(terms))
}
