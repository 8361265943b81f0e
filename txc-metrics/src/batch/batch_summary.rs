use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ArchiveOutcome;
use crate::metrics::{round_to_hundredths, TimeBandCounts};

/// aggregate statistics of a run, reported to the operator and optionally
/// written as JSON. nothing downstream consumes these values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub archives_attempted: usize,
    pub archives_succeeded: usize,
    pub archives_failed: usize,
    pub documents_parsed: usize,
    pub documents_failed: usize,
    pub records: usize,
    /// over records with a measured route
    pub mean_route_length_km: Option<f64>,
    pub mean_stops_per_route: Option<f64>,
    pub total_trips_per_day: usize,
    pub total_mileage_per_day: f64,
    pub cross_region_routes: usize,
    pub cross_authority_routes: usize,
    /// extended runs only
    pub mean_circuity_index: Option<f64>,
    /// extended runs only, keyed by time band name
    pub trips_by_time_band: Option<BTreeMap<String, usize>>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ArchiveOutcome], extended: bool) -> BatchSummary {
        let mut summary = BatchSummary {
            archives_attempted: outcomes.len(),
            ..Default::default()
        };
        let mut length_sum = 0.0;
        let mut measured = 0;
        let mut stops_sum = 0;
        let mut circuity_sum = 0.0;
        let mut circuity_n = 0;
        let mut mileage = 0.0;
        let mut bands = TimeBandCounts::default();

        for outcome in outcomes.iter() {
            if outcome.is_readable() {
                summary.archives_succeeded += 1;
            } else {
                summary.archives_failed += 1;
            }
            for document in outcome.documents().iter() {
                if document.is_failed() {
                    summary.documents_failed += 1;
                } else {
                    summary.documents_parsed += 1;
                }
            }
            for record in outcome.records() {
                summary.records += 1;
                stops_sum += record.num_stops;
                summary.total_trips_per_day += record.trips_per_day;
                if record.crosses_region_boundary() {
                    summary.cross_region_routes += 1;
                }
                if record.crosses_authority_boundary() {
                    summary.cross_authority_routes += 1;
                }
                if let Some(length) = record.route_length_km {
                    length_sum += length;
                    measured += 1;
                }
                mileage += record.mileage_per_day.unwrap_or_default();
                if let Some(ext) = &record.extended {
                    if let Some(circuity) = ext.circuity_index {
                        circuity_sum += circuity;
                        circuity_n += 1;
                    }
                    bands.add(&ext.time_bands);
                }
            }
        }

        summary.total_mileage_per_day = round_to_hundredths(mileage);
        summary.mean_route_length_km = mean(length_sum, measured);
        summary.mean_stops_per_route = mean(stops_sum as f64, summary.records);
        if extended {
            summary.mean_circuity_index = mean(circuity_sum, circuity_n);
            summary.trips_by_time_band = Some(
                bands
                    .iter()
                    .map(|(band, n)| (band.name().to_string(), n))
                    .collect(),
            );
        }
        summary
    }

    /// writes the final report of a run to the log
    pub fn log_report(&self) {
        log::info!(
            "processed {} archives: {} succeeded, {} failed; {} documents parsed, {} failed",
            self.archives_attempted,
            self.archives_succeeded,
            self.archives_failed,
            self.documents_parsed,
            self.documents_failed
        );
        log::info!(
            "{} route records, mean length {} km, mean {} stops per route, {} trips per day",
            self.records,
            display_optional(self.mean_route_length_km),
            display_optional(self.mean_stops_per_route),
            self.total_trips_per_day
        );
        log::info!(
            "{} routes cross a region boundary, {} cross a local authority boundary",
            self.cross_region_routes,
            self.cross_authority_routes
        );
        if let Some(circuity) = self.mean_circuity_index {
            log::info!("mean circuity index {circuity:.2}");
        }
        if let Some(bands) = &self.trips_by_time_band {
            for (band, n) in bands.iter() {
                log::info!("trips in {band}: {n}");
            }
        }
    }
}

fn mean(sum: f64, n: usize) -> Option<f64> {
    if n == 0 {
        None
    } else {
        Some(round_to_hundredths(sum / n as f64))
    }
}

fn display_optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| String::from("n/a"))
}
