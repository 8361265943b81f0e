use crate::document::PatternTrips;

/// one journey pattern of a document with its sections flattened into a
/// single stop sequence. stop ids are raw references, not yet matched against
/// the stop index, and repeat wherever consecutive sections share a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    pub pattern_id: String,
    pub line_name: String,
    pub stop_ids: Vec<String>,
    pub trips: PatternTrips,
}

impl RoutePattern {
    /// stop count before coordinate matching
    pub fn raw_stop_count(&self) -> usize {
        self.stop_ids.len()
    }
}
