/// the scheduled trips of one journey pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTrips {
    /// number of vehicle journeys referencing the pattern
    pub trip_count: usize,
    /// departure times of those journeys in document order. journeys
    /// without a departure time still count as trips.
    pub departure_times: Vec<String>,
}

impl PatternTrips {
    /// the first `n` departure times
    pub fn sample(&self, n: usize) -> &[String] {
        &self.departure_times[..n.min(self.departure_times.len())]
    }
}
