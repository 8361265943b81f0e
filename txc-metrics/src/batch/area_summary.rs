use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::{round_to_hundredths, RouteMetricsRecord};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Region,
    LocalAuthority,
}

/// totals over the routes that touch one region or local authority. a route
/// touching several areas counts toward each of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AreaSummary {
    pub area_type: AreaType,
    pub area_code: String,
    pub routes: usize,
    pub total_trips_per_day: usize,
    pub total_mileage_per_day: f64,
    pub mean_route_length_km: f64,
    /// routes that also touch another area of the same type
    pub boundary_crossing_routes: usize,
}

#[derive(Default)]
struct AreaAccumulator {
    routes: usize,
    trips: usize,
    mileage: f64,
    length: f64,
    crossing: usize,
}

impl AreaSummary {
    pub const CSV_HEADER: [&'static str; 7] = [
        "area_type",
        "area_code",
        "routes",
        "total_trips_per_day",
        "total_mileage_per_day",
        "mean_route_length_km",
        "boundary_crossing_routes",
    ];

    /// summarizes records by region, then by local authority, each sorted by
    /// area code. records without geometry have no areas and are not counted.
    pub fn from_records<'a, I>(records: I) -> Vec<AreaSummary>
    where
        I: IntoIterator<Item = &'a RouteMetricsRecord>,
    {
        let mut areas: BTreeMap<(AreaType, String), AreaAccumulator> = BTreeMap::new();
        for record in records {
            let by_type = [
                (AreaType::Region, &record.regions_served),
                (AreaType::LocalAuthority, &record.local_authorities_served),
            ];
            for (area_type, codes) in by_type {
                let crossing = codes.len() > 1;
                for code in codes.iter() {
                    let acc = areas.entry((area_type, code.clone())).or_default();
                    acc.routes += 1;
                    acc.trips += record.trips_per_day;
                    acc.mileage += record.mileage_per_day.unwrap_or_default();
                    acc.length += record.route_length_km.unwrap_or_default();
                    if crossing {
                        acc.crossing += 1;
                    }
                }
            }
        }
        areas
            .into_iter()
            .map(|((area_type, area_code), acc)| AreaSummary {
                area_type,
                area_code,
                routes: acc.routes,
                total_trips_per_day: acc.trips,
                total_mileage_per_day: round_to_hundredths(acc.mileage),
                mean_route_length_km: round_to_hundredths(acc.length / acc.routes as f64),
                boundary_crossing_routes: acc.crossing,
            })
            .collect()
    }
}
