use roxmltree::Node;

use super::xml_ops::{child_text, descendant_elements};

/// a `VehicleJourney` element: one scheduled trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleJourneyDefinition {
    pub journey_code: Option<String>,
    /// the journey pattern this trip runs
    pub pattern_ref: Option<String>,
    /// another journey this one copies its pattern from, when `pattern_ref` is absent
    pub journey_ref: Option<String>,
    /// raw departure time text, expected as HH:MM or HH:MM:SS
    pub departure_time: Option<String>,
}

impl VehicleJourneyDefinition {
    pub fn from_document(root: Node) -> Vec<VehicleJourneyDefinition> {
        descendant_elements(root, "VehicleJourney")
            .map(|journey| VehicleJourneyDefinition {
                journey_code: child_text(journey, &["VehicleJourneyCode"]),
                pattern_ref: child_text(journey, &["JourneyPatternRef"]),
                journey_ref: child_text(journey, &["VehicleJourneyRef"]),
                departure_time: child_text(journey, &["DepartureTime"]),
            })
            .collect()
    }
}
