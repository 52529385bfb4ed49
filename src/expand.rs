use crate::combine::combine_criteria;
use crate::locate::find_origins;
use crate::{AnalysisError, CombinedCriteria, OriginRecord, RuleNode};

/// Turn the combined criteria of one origin location into flat records.
///
/// Emits one record per alternative, path alternatives first, then request
/// hostname, then conditional origin. With no alternatives at all, emits a
/// single unconditional record.
#[must_use]
pub fn expand(hostname: &str, combined: &CombinedCriteria) -> Vec<OriginRecord> {
    let records: Vec<OriginRecord> = combined
        .iter()
        .flat_map(|(kind, alternatives)| {
            alternatives
                .iter()
                .map(move |expr| OriginRecord::refined(hostname, kind, expr.as_str()))
        })
        .collect();

    if records.is_empty() {
        vec![OriginRecord::new(hostname)]
    } else {
        records
    }
}

/// Locate every origin in the tree, combine its ancestor criteria and expand
/// the result. Records follow tree order and are not deduplicated.
///
/// # Errors
///
/// Returns [`AnalysisError`] if a located origin cannot be resolved again,
/// which indicates an engine defect rather than bad input.
pub fn collate_origins(tree: &RuleNode) -> Result<Vec<OriginRecord>, AnalysisError> {
    let mut records = Vec::new();
    for origin in find_origins(tree) {
        let combined = combine_criteria(tree, &origin.location)?;
        let expanded = expand(&origin.hostname, &combined);
        tracing::debug!(
            hostname = %origin.hostname,
            location = %origin.location,
            depth = origin.location.depth(),
            records = expanded.len(),
            "expanded origin"
        );
        records.extend(expanded);
    }
    Ok(records)
}
