use std::collections::HashMap;

use super::{
    find_line_name, resolve_sections, JourneyPatternDefinition, PatternTrips,
    VehicleJourneyDefinition,
};
use crate::TxcError;

/// the single namespace of the TransXChange vocabulary
pub const TXC_NAMESPACE: &str = "http://www.transxchange.org.uk/";

/// the parts of one TransXChange document needed to rebuild route patterns.
/// owns its data, so the XML text can be dropped after parsing.
#[derive(Debug, Clone)]
pub struct TxcDocument {
    /// display name of the service's line, empty if not listed
    pub line_name: String,
    /// stop sequence of each journey pattern section, by section id
    pub sections: HashMap<String, Vec<String>>,
    /// journey patterns in document order
    pub patterns: Vec<JourneyPatternDefinition>,
    pub journeys: Vec<VehicleJourneyDefinition>,
    trips_by_pattern: HashMap<String, PatternTrips>,
}

impl TxcDocument {
    /// parses the XML text of a schedule document.
    ///
    /// # Arguments
    ///
    /// * `name` - document name, used in error messages
    /// * `text` - XML contents
    ///
    /// # Returns
    ///
    /// the document, or an error if the XML is malformed or the root element is not `TransXChange`
    pub fn parse(name: &str, text: &str) -> Result<TxcDocument, TxcError> {
        let xml = roxmltree::Document::parse(text)
            .map_err(|e| TxcError::XmlParseError(name.to_string(), e))?;
        let root = xml.root_element();
        if root.tag_name().name() != "TransXChange" {
            return Err(TxcError::MissingElement(
                name.to_string(),
                String::from("TransXChange"),
            ));
        }
        match root.tag_name().namespace() {
            Some(ns) if ns != TXC_NAMESPACE => {
                log::debug!("document '{name}' uses unexpected namespace '{ns}'")
            }
            _ => {}
        }

        let journeys = VehicleJourneyDefinition::from_document(root);
        let trips_by_pattern = group_trips_by_pattern(&journeys);
        Ok(TxcDocument {
            line_name: find_line_name(root),
            sections: resolve_sections(root),
            patterns: JourneyPatternDefinition::from_document(root),
            journeys,
            trips_by_pattern,
        })
    }

    /// trip count and departure times of the vehicle journeys running a pattern.
    /// a pattern no journey references has zero trips.
    pub fn pattern_trips(&self, pattern_id: &str) -> PatternTrips {
        self.trips_by_pattern
            .get(pattern_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// groups journeys by the pattern they run, preserving document order within each
/// pattern. a journey without its own pattern reference takes the pattern of the
/// journey named by its `VehicleJourneyRef`, one hop only.
fn group_trips_by_pattern(journeys: &[VehicleJourneyDefinition]) -> HashMap<String, PatternTrips> {
    let pattern_by_code: HashMap<&str, &str> = journeys
        .iter()
        .filter_map(|j| match (&j.journey_code, &j.pattern_ref) {
            (Some(code), Some(pattern)) => Some((code.as_str(), pattern.as_str())),
            _ => None,
        })
        .collect();

    let mut trips: HashMap<String, PatternTrips> = HashMap::new();
    for journey in journeys.iter() {
        let pattern_id = match (&journey.pattern_ref, &journey.journey_ref) {
            (Some(pattern), _) => Some(pattern.as_str()),
            (None, Some(journey_ref)) => pattern_by_code.get(journey_ref.as_str()).copied(),
            (None, None) => None,
        };
        if let Some(pattern_id) = pattern_id {
            let entry = trips.entry(pattern_id.to_string()).or_default();
            entry.trip_count += 1;
            if let Some(departure) = &journey.departure_time {
                entry.departure_times.push(departure.clone());
            }
        }
    }
    trips
}

#[cfg(test)]
mod test {
    use super::TxcDocument;
    use crate::test_fixtures::txc_xml;
    use crate::TxcError;

    #[test]
    fn test_parse_full_document() {
        let xml = txc_xml(
            "X5",
            &[("JPS1", &["S1", "S2", "S3"]), ("JPS2", &["S3", "S4"])],
            &[("JP1", &["JPS1", "JPS2"]), ("JP2", &["JPS2"])],
            &[("JP1", "07:15:00"), ("JP1", "08:00"), ("JP2", "12:00:00")],
        );
        let doc = TxcDocument::parse("test.xml", &xml).expect("document should parse");
        assert_eq!(doc.line_name, "X5");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.patterns.len(), 2);
        assert_eq!(doc.patterns[0].pattern_id, "JP1");
        assert_eq!(doc.patterns[0].section_refs, vec!["JPS1", "JPS2"]);
        assert_eq!(doc.journeys.len(), 3);

        let jp1 = doc.pattern_trips("JP1");
        assert_eq!(jp1.trip_count, 2);
        assert_eq!(jp1.departure_times, vec!["07:15:00", "08:00"]);
        assert_eq!(doc.pattern_trips("JP2").trip_count, 1);
        assert_eq!(doc.pattern_trips("UNUSED").trip_count, 0);
    }

    #[test]
    fn test_journey_ref_inherits_pattern() {
        let xml = "<TransXChange xmlns=\"http://www.transxchange.org.uk/\"><VehicleJourneys>\
                   <VehicleJourney><VehicleJourneyCode>VJ1</VehicleJourneyCode>\
                   <JourneyPatternRef>JP1</JourneyPatternRef><DepartureTime>06:00:00</DepartureTime></VehicleJourney>\
                   <VehicleJourney><VehicleJourneyCode>VJ2</VehicleJourneyCode>\
                   <VehicleJourneyRef>VJ1</VehicleJourneyRef><DepartureTime>06:30:00</DepartureTime></VehicleJourney>\
                   <VehicleJourney><VehicleJourneyCode>VJ3</VehicleJourneyCode>\
                   <VehicleJourneyRef>UNKNOWN</VehicleJourneyRef></VehicleJourney>\
                   <VehicleJourney><JourneyPatternRef>JP1</JourneyPatternRef></VehicleJourney>\
                   </VehicleJourneys></TransXChange>";
        let doc = TxcDocument::parse("refs.xml", xml).expect("document should parse");
        let trips = doc.pattern_trips("JP1");
        assert_eq!(trips.trip_count, 3);
        assert_eq!(trips.departure_times, vec!["06:00:00", "06:30:00"]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = TxcDocument::parse("broken.xml", "<TransXChange><Services>");
        assert!(matches!(result, Err(TxcError::XmlParseError(_, _))));
    }

    #[test]
    fn test_wrong_root_element_is_an_error() {
        let result = TxcDocument::parse("other.xml", "<kml><Document/></kml>");
        assert!(matches!(result, Err(TxcError::MissingElement(_, _))));
    }
}
