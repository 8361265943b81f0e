use std::collections::BTreeSet;

use geo::Point;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{TimeBand, TimeBandCounts};

/// separator used when a set or sequence is written into a single csv field
pub const FIELD_SEPARATOR: &str = "|";

/// one row of the route metrics table, describing a single journey pattern
/// of a single schedule document.
///
/// geometry fields are `None` for a pattern emitted without enough resolved
/// stops to measure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RouteMetricsRecord {
    /// name of the archive (or plain document) the pattern was read from
    pub source_file: String,
    pub pattern_id: String,
    pub line_name: String,
    /// sum of great-circle legs between resolved stops, km
    pub route_length_km: Option<f64>,
    /// stop count before coordinate matching
    pub num_stops: usize,
    pub trips_per_day: usize,
    pub regions_served: BTreeSet<String>,
    pub local_authorities_served: BTreeSet<String>,
    pub mileage_per_day: Option<f64>,
    pub extended: Option<ExtendedRouteMetrics>,
}

/// the fields only computed when extended metrics are enabled
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExtendedRouteMetrics {
    /// resolved stop ids in pattern order
    pub stop_sequence: Vec<String>,
    pub first_stop: Option<Point<f64>>,
    pub last_stop: Option<Point<f64>>,
    pub straight_line_distance_km: Option<f64>,
    pub circuity_index: Option<f64>,
    pub departure_times_sample: Vec<String>,
    pub time_bands: TimeBandCounts,
    /// LINESTRING of resolved stops, only when geometry output is enabled
    pub route_wkt: Option<String>,
}

const BASIC_COLUMNS: [&str; 13] = [
    "source_file",
    "pattern_id",
    "line_name",
    "route_length_km",
    "num_stops",
    "trips_per_day",
    "regions_served",
    "num_regions",
    "local_authorities_served",
    "num_local_authorities",
    "crosses_region_boundary",
    "crosses_authority_boundary",
    "mileage_per_day",
];

const EXTENDED_COLUMNS: [&str; 8] = [
    "stop_sequence",
    "first_stop_lat",
    "first_stop_lon",
    "last_stop_lat",
    "last_stop_lon",
    "straight_line_distance_km",
    "circuity_index",
    "departure_times_sample",
];

const GEOMETRY_COLUMN: &str = "route_wkt";

impl RouteMetricsRecord {
    pub fn num_regions(&self) -> usize {
        self.regions_served.len()
    }

    pub fn num_local_authorities(&self) -> usize {
        self.local_authorities_served.len()
    }

    pub fn crosses_region_boundary(&self) -> bool {
        self.regions_served.len() > 1
    }

    pub fn crosses_authority_boundary(&self) -> bool {
        self.local_authorities_served.len() > 1
    }

    /// column names of the route metrics table. extended columns follow the
    /// basic ones, then one `trips_<band>` column per time band, then the
    /// optional geometry column.
    pub fn csv_header(extended: bool, geometry: bool) -> Vec<String> {
        let mut header = BASIC_COLUMNS.iter().map(|c| c.to_string()).collect_vec();
        if extended {
            header.extend(EXTENDED_COLUMNS.iter().map(|c| c.to_string()));
            header.extend(TimeBand::ALL.iter().map(|b| format!("trips_{}", b.name())));
            if geometry {
                header.push(String::from(GEOMETRY_COLUMN));
            }
        }
        header
    }

    /// renders this record in the column order of [`RouteMetricsRecord::csv_header`].
    /// sets are written sorted and pipe-joined, measured values with two decimals,
    /// and missing values as empty fields.
    pub fn csv_row(&self, extended: bool, geometry: bool) -> Vec<String> {
        let mut row = vec![
            self.source_file.clone(),
            self.pattern_id.clone(),
            self.line_name.clone(),
            format_measure(self.route_length_km),
            self.num_stops.to_string(),
            self.trips_per_day.to_string(),
            self.regions_served.iter().join(FIELD_SEPARATOR),
            self.num_regions().to_string(),
            self.local_authorities_served.iter().join(FIELD_SEPARATOR),
            self.num_local_authorities().to_string(),
            self.crosses_region_boundary().to_string(),
            self.crosses_authority_boundary().to_string(),
            format_measure(self.mileage_per_day),
        ];
        if !extended {
            return row;
        }
        match &self.extended {
            Some(ext) => {
                row.push(ext.stop_sequence.join(FIELD_SEPARATOR));
                row.push(format_coordinate(ext.first_stop.map(|p| p.y())));
                row.push(format_coordinate(ext.first_stop.map(|p| p.x())));
                row.push(format_coordinate(ext.last_stop.map(|p| p.y())));
                row.push(format_coordinate(ext.last_stop.map(|p| p.x())));
                row.push(format_measure(ext.straight_line_distance_km));
                row.push(format_measure(ext.circuity_index));
                row.push(ext.departure_times_sample.join(FIELD_SEPARATOR));
                row.extend(ext.time_bands.iter().map(|(_, n)| n.to_string()));
                if geometry {
                    row.push(ext.route_wkt.clone().unwrap_or_default());
                }
            }
            None => {
                let n_missing = EXTENDED_COLUMNS.len()
                    + TimeBand::ALL.len()
                    + if geometry { 1 } else { 0 };
                row.extend(std::iter::repeat(String::new()).take(n_missing));
            }
        }
        row
    }
}

fn format_measure(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
