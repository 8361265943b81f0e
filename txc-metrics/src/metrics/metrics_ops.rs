use std::collections::BTreeSet;

use geo::LineString;
use itertools::Itertools;
use uom::si::{f64::Length, length::kilometer};
use wkt::ToWkt;

use super::{
    compute_haversine, leg_distances, round_to_hundredths, ExtendedRouteMetrics,
    RouteMetricsRecord, TimeBandCounts,
};
use crate::{
    config::TxcMetricsConfig,
    pattern::{ResolvedPattern, RoutePattern},
};

/// straight-line distances below this are treated as a loop route with circuity 1.0
const MIN_STRAIGHT_LINE_KM: f64 = 0.1;

/// computes the route metrics of a pattern with at least two resolved stops.
///
/// # Arguments
///
/// * `source_file` - name of the archive the pattern was read from
/// * `resolved` - the pattern and its stops found in the stop index
/// * `config` - selects extended metrics, the departure sample size and geometry output
///
/// # Returns
///
/// one output row. route length and mileage are rounded to two decimals, with
/// mileage computed from the rounded route length.
pub fn compute_route_metrics(
    source_file: &str,
    resolved: &ResolvedPattern,
    config: &TxcMetricsConfig,
) -> RouteMetricsRecord {
    let pattern = resolved.pattern();
    let points = resolved.stops().iter().map(|s| s.point()).collect_vec();
    let route_length = leg_distances(&points)
        .into_iter()
        .fold(Length::new::<kilometer>(0.0), |acc, leg| acc + leg);
    let route_length_km = round_to_hundredths(route_length.get::<kilometer>());
    let mileage_per_day = round_to_hundredths(route_length_km * pattern.trips.trip_count as f64);

    let regions_served: BTreeSet<String> = resolved
        .stops()
        .iter()
        .filter_map(|s| s.region.clone())
        .collect();
    let local_authorities_served: BTreeSet<String> = resolved
        .stops()
        .iter()
        .filter_map(|s| s.local_authority.clone())
        .collect();

    let extended = if config.extended_metrics {
        let first = resolved.first_stop().point();
        let last = resolved.last_stop().point();
        let straight_line = compute_haversine(first, last).get::<kilometer>();
        let circuity_index = if straight_line < MIN_STRAIGHT_LINE_KM {
            1.0
        } else {
            round_to_hundredths(route_length.get::<kilometer>() / straight_line)
        };
        let route_wkt = if config.write_geometry {
            let line: LineString<f64> = points.iter().map(|p| p.0).collect();
            Some(line.to_wkt().to_string())
        } else {
            None
        };
        Some(ExtendedRouteMetrics {
            stop_sequence: resolved.stops().iter().map(|s| s.stop_id.clone()).collect(),
            first_stop: Some(first),
            last_stop: Some(last),
            straight_line_distance_km: Some(round_to_hundredths(straight_line)),
            circuity_index: Some(circuity_index),
            departure_times_sample: pattern
                .trips
                .sample(config.departure_time_sample_size)
                .to_vec(),
            time_bands: TimeBandCounts::from_departures(&pattern.trips.departure_times),
            route_wkt,
        })
    } else {
        None
    };

    RouteMetricsRecord {
        source_file: source_file.to_string(),
        pattern_id: pattern.pattern_id.clone(),
        line_name: pattern.line_name.clone(),
        route_length_km: Some(route_length_km),
        num_stops: pattern.raw_stop_count(),
        trips_per_day: pattern.trips.trip_count,
        regions_served,
        local_authorities_served,
        mileage_per_day: Some(mileage_per_day),
        extended,
    }
}

/// the record of a pattern with fewer than two resolved stops. it carries the raw
/// stop count and trips; every geometry field is left empty.
pub fn unresolved_route_metrics(
    source_file: &str,
    pattern: &RoutePattern,
    config: &TxcMetricsConfig,
) -> RouteMetricsRecord {
    let extended = if config.extended_metrics {
        Some(ExtendedRouteMetrics {
            stop_sequence: vec![],
            first_stop: None,
            last_stop: None,
            straight_line_distance_km: None,
            circuity_index: None,
            departure_times_sample: pattern
                .trips
                .sample(config.departure_time_sample_size)
                .to_vec(),
            time_bands: TimeBandCounts::from_departures(&pattern.trips.departure_times),
            route_wkt: None,
        })
    } else {
        None
    };
    RouteMetricsRecord {
        source_file: source_file.to_string(),
        pattern_id: pattern.pattern_id.clone(),
        line_name: pattern.line_name.clone(),
        route_length_km: None,
        num_stops: pattern.raw_stop_count(),
        trips_per_day: pattern.trips.trip_count,
        regions_served: BTreeSet::new(),
        local_authorities_served: BTreeSet::new(),
        mileage_per_day: None,
        extended,
    }
}

#[cfg(test)]
mod test {
    use super::{compute_route_metrics, unresolved_route_metrics};
    use crate::config::{DuplicateStopPolicy, TxcMetricsConfig};
    use crate::document::PatternTrips;
    use crate::metrics::{RouteMetricsRecord, TimeBand};
    use crate::pattern::{resolve_pattern, AssembledPattern, RoutePattern};
    use crate::stops::{StopCoordinate, StopIndex};
    use crate::test_fixtures::test_stop_index;

    fn pattern(stop_ids: &[&str], departures: &[&str]) -> RoutePattern {
        RoutePattern {
            pattern_id: String::from("JP1"),
            line_name: String::from("X5"),
            stop_ids: stop_ids.iter().map(|s| s.to_string()).collect(),
            trips: PatternTrips {
                trip_count: departures.len(),
                departure_times: departures.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    fn extended_config() -> TxcMetricsConfig {
        TxcMetricsConfig {
            extended_metrics: true,
            write_geometry: true,
            departure_time_sample_size: 2,
            ..Default::default()
        }
    }

    fn metrics(p: RoutePattern, config: &TxcMetricsConfig) -> RouteMetricsRecord {
        let index = test_stop_index();
        match resolve_pattern(p, &index) {
            AssembledPattern::Resolved(resolved) => {
                compute_route_metrics("london.zip", &resolved, config)
            }
            AssembledPattern::Unresolved(_) => panic!("expected a resolved pattern"),
        }
    }

    #[test]
    fn test_three_stop_route_with_five_trips() {
        let departures = ["07:15:00", "08:00:00", "12:00:00", "17:00:00", "23:30:00"];
        let config = extended_config();
        let record = metrics(pattern(&["S1", "S2", "S3"], &departures), &config);

        // two legs of 0.01 degrees latitude, about 1.11 km each
        assert_eq!(record.route_length_km, Some(2.22));
        assert_eq!(record.mileage_per_day, Some(11.1));
        assert_eq!(record.num_stops, 3);
        assert_eq!(record.trips_per_day, 5);
        assert_eq!(record.num_regions(), 1);
        assert!(!record.crosses_region_boundary());
        assert_eq!(record.num_local_authorities(), 2);
        assert!(record.crosses_authority_boundary());

        let ext = record.extended.expect("extended metrics");
        assert_eq!(ext.stop_sequence, vec!["S1", "S2", "S3"]);
        assert_eq!(ext.straight_line_distance_km, Some(2.22));
        assert_eq!(ext.circuity_index, Some(1.0));
        assert_eq!(ext.departure_times_sample, vec!["07:15:00", "08:00:00"]);
        assert_eq!(ext.time_bands.get(TimeBand::MorningSchool), 2);
        assert_eq!(ext.time_bands.get(TimeBand::MorningCommute), 2);
        assert_eq!(ext.time_bands.get(TimeBand::Midday), 1);
        assert_eq!(ext.time_bands.get(TimeBand::AfternoonSchool), 0);
        assert_eq!(ext.time_bands.get(TimeBand::EveningCommute), 1);
        assert_eq!(ext.time_bands.get(TimeBand::Night), 1);
        let wkt = ext.route_wkt.expect("geometry");
        assert!(wkt.starts_with("LINESTRING"));
    }

    #[test]
    fn test_loop_route_has_unit_circuity() {
        let config = extended_config();
        let record = metrics(pattern(&["S1", "S3", "S1"], &["10:00"]), &config);
        let ext = record.extended.expect("extended metrics");
        assert_eq!(ext.straight_line_distance_km, Some(0.0));
        assert_eq!(ext.circuity_index, Some(1.0));
        assert_eq!(record.route_length_km, Some(4.45));
    }

    #[test]
    fn test_near_loop_route_has_unit_circuity() {
        // the route returns to about 50 m north of where it started
        let stops = vec![
            StopCoordinate::new(String::from("S1"), 51.50, -0.12, None, None),
            StopCoordinate::new(String::from("S3"), 51.52, -0.12, None, None),
            StopCoordinate::new(String::from("S1B"), 51.50045, -0.12, None, None),
        ];
        let index = StopIndex::from_coordinates(stops, DuplicateStopPolicy::LastWins);
        let resolved = match resolve_pattern(pattern(&["S1", "S3", "S1B"], &["10:00"]), &index) {
            AssembledPattern::Resolved(resolved) => resolved,
            AssembledPattern::Unresolved(_) => panic!("expected a resolved pattern"),
        };
        let record = compute_route_metrics("london.zip", &resolved, &extended_config());
        let ext = record.extended.expect("extended metrics");
        assert_eq!(ext.straight_line_distance_km, Some(0.05));
        assert_eq!(ext.circuity_index, Some(1.0));
        assert_eq!(record.route_length_km, Some(4.4));
    }

    #[test]
    fn test_detour_raises_circuity() {
        let config = extended_config();
        let record = metrics(pattern(&["S1", "S3", "S2"], &[]), &config);
        let ext = record.extended.expect("extended metrics");
        // 2.22 + 1.11 km over 1.11 km straight line
        assert_eq!(ext.circuity_index, Some(3.0));
        assert_eq!(record.mileage_per_day, Some(0.0));
    }

    #[test]
    fn test_pattern_without_trips_has_zero_mileage() {
        let record = metrics(pattern(&["S1", "S2"], &[]), &TxcMetricsConfig::default());
        assert_eq!(record.trips_per_day, 0);
        assert_eq!(record.mileage_per_day, Some(0.0));
        assert!(record.extended.is_none());
    }

    #[test]
    fn test_duplicate_boundary_stops_add_zero_length_leg() {
        let config = TxcMetricsConfig::default();
        let with_duplicate = metrics(pattern(&["S1", "S2", "S2", "S3"], &["09:00"]), &config);
        let without = metrics(pattern(&["S1", "S2", "S3"], &["09:00"]), &config);
        assert_eq!(with_duplicate.route_length_km, without.route_length_km);
        assert_eq!(with_duplicate.num_stops, 4);
    }

    #[test]
    fn test_unresolved_record_keeps_counts() {
        let config = extended_config();
        let record =
            unresolved_route_metrics("london.zip", &pattern(&["S1", "X", "Y"], &["07:30"]), &config);
        assert_eq!(record.num_stops, 3);
        assert_eq!(record.trips_per_day, 1);
        assert!(record.route_length_km.is_none());
        assert!(record.mileage_per_day.is_none());
        let ext = record.extended.expect("extended metrics");
        assert!(ext.circuity_index.is_none());
        assert_eq!(ext.time_bands.get(TimeBand::MorningSchool), 1);
    }
}
