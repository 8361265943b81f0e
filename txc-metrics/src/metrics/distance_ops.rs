use geo::{Distance, HaversineMeasure, Point};
use itertools::Itertools;
use uom::si::{f64::Length, length::meter};

/// spherical earth radius used for all great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM * 1000.0);

/// great-circle distance between two x=lon, y=lat points
pub fn compute_haversine(src_point: Point<f64>, dst_point: Point<f64>) -> Length {
    Length::new::<meter>(EARTH.distance(src_point, dst_point))
}

/// great-circle distance of each consecutive pair of points, in order
pub fn leg_distances(points: &[Point<f64>]) -> Vec<Length> {
    points
        .iter()
        .tuple_windows()
        .map(|(src, dst)| compute_haversine(*src, *dst))
        .collect()
}

/// rounds to 2 decimal places, the precision of every numeric output field
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
