mod error;
mod grammar;

pub use error::ParseError;

use crate::MatchExpr;

/// Parse an emitted match expression such as `"/community AND !/community/*/amp"`.
///
/// Terms are split on `" AND "` and keep any other whitespace verbatim. A
/// `\` after the optional `!` marks a following `!` or `\` as literal.
///
/// # Errors
///
/// Returns [`ParseError`] if the input or any term is empty, or a `!` has no
/// pattern after it.
pub fn parse(input: &str) -> Result<MatchExpr, ParseError> {
    use winnow::Parser;
    if input.is_empty() {
        return Err(ParseError::new(input, "empty match expression"));
    }
    grammar::match_expr
        .parse(input)
        .map_err(|e| ParseError::new(input, e.to_string()))
}
