use geo::Point;
use serde::{Deserialize, Serialize};

/// location and administrative areas of a single stop point, keyed in the
/// [`super::StopIndex`] by its identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StopCoordinate {
    pub stop_id: String,
    /// WGS84 degrees
    pub latitude: f64,
    /// WGS84 degrees
    pub longitude: f64,
    pub region: Option<String>,
    pub local_authority: Option<String>,
}

impl StopCoordinate {
    pub fn new(
        stop_id: String,
        latitude: f64,
        longitude: f64,
        region: Option<String>,
        local_authority: Option<String>,
    ) -> Self {
        Self {
            stop_id,
            latitude,
            longitude,
            region,
            local_authority,
        }
    }

    /// this stop as an x=lon, y=lat point
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}
