mod distance_ops;
mod metrics_ops;
mod route_metrics_record;
mod time_band;
mod time_band_counts;

pub use distance_ops::{compute_haversine, leg_distances, round_to_hundredths, EARTH_RADIUS_KM};
pub use metrics_ops::{compute_route_metrics, unresolved_route_metrics};
pub use route_metrics_record::{ExtendedRouteMetrics, RouteMetricsRecord};
pub use time_band::{parse_departure_time, TimeBand};
pub use time_band_counts::TimeBandCounts;
