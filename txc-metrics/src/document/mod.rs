//! parsing of TransXChange schedule documents into journey pattern sections,
//! journey patterns and vehicle journeys.
//! see [https://www.gov.uk/government/collections/transxchange] for the schema.
mod journey_pattern;
mod pattern_trips;
mod section_ops;
mod txc_document;
mod vehicle_journey;
mod xml_ops;

pub use journey_pattern::JourneyPatternDefinition;
pub use pattern_trips::PatternTrips;
pub use section_ops::{find_line_name, resolve_sections};
pub use txc_document::{TxcDocument, TXC_NAMESPACE};
pub use vehicle_journey::VehicleJourneyDefinition;
