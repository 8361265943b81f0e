use serde::{Deserialize, Serialize};

use super::{parse_departure_time, TimeBand};

/// number of trips departing within each [`TimeBand`], in band order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBandCounts([usize; 7]);

impl TimeBandCounts {
    /// classifies every departure time. unparseable times are skipped and a time
    /// inside overlapping bands counts once in each.
    pub fn from_departures<'a, I>(departures: I) -> TimeBandCounts
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts = TimeBandCounts::default();
        for raw in departures {
            match parse_departure_time(raw) {
                Some(time) => {
                    for band in TimeBand::classify(&time) {
                        counts.0[band.index()] += 1;
                    }
                }
                None => log::debug!("skipping unparseable departure time '{raw}'"),
            }
        }
        counts
    }

    pub fn get(&self, band: TimeBand) -> usize {
        self.0[band.index()]
    }

    /// adds the counts of another pattern to these, band by band
    pub fn add(&mut self, other: &TimeBandCounts) {
        for (acc, n) in self.0.iter_mut().zip(other.0.iter()) {
            *acc += n;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeBand, usize)> + '_ {
        TimeBand::ALL.into_iter().map(|band| (band, self.get(band)))
    }
}
