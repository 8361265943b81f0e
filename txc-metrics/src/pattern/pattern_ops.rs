use super::{AssembledPattern, ResolvedPattern, RoutePattern};
use crate::{
    document::TxcDocument,
    stops::{StopCoordinate, StopIndex},
};

/// flattens each journey pattern of a document into one stop sequence.
///
/// section references are followed in order and their stop sequences are
/// concatenated as-is; a reference to an unknown section is skipped. patterns
/// whose sections produce no stops at all are dropped.
pub fn assemble_patterns(document: &TxcDocument) -> Vec<RoutePattern> {
    document
        .patterns
        .iter()
        .filter_map(|definition| {
            let stop_ids: Vec<String> = definition
                .section_refs
                .iter()
                .filter_map(|section_ref| document.sections.get(section_ref))
                .flatten()
                .cloned()
                .collect();
            if stop_ids.is_empty() {
                return None;
            }
            Some(RoutePattern {
                pattern_id: definition.pattern_id.clone(),
                line_name: document.line_name.clone(),
                stop_ids,
                trips: document.pattern_trips(&definition.pattern_id),
            })
        })
        .collect()
}

/// matches the stops of a pattern against the stop index, keeping pattern order
/// and dropping stops without coordinates.
pub fn resolve_pattern(pattern: RoutePattern, index: &StopIndex) -> AssembledPattern<'_> {
    let stops: Vec<&StopCoordinate> = pattern
        .stop_ids
        .iter()
        .filter_map(|stop_id| index.get(stop_id))
        .collect();
    match ResolvedPattern::new(pattern, stops) {
        Ok(resolved) => AssembledPattern::Resolved(resolved),
        Err(pattern) => AssembledPattern::Unresolved(pattern),
    }
}
