use thiserror::Error;

/// A caller-supplied document rejected before analysis begins.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid rule tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object for the {what}")]
    NotAnObject { what: &'static str },

    #[error("property document has no 'rules' object")]
    MissingRules,
}

/// An internal inconsistency discovered while analysing a decoded tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no rule node or behavior at location '{location}'")]
    LocationNotFound { location: String },
}
