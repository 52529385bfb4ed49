use thiserror::Error;

use crate::parse::ParseError;
use crate::{AnalysisError, DocumentError};

/// Unified error type covering document loading, analysis, parsing, and I/O.
///
/// Returned by convenience methods like [`RuleTree::from_file()`](crate::RuleTree::from_file).
#[derive(Debug, Error)]
pub enum RulewalkError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
