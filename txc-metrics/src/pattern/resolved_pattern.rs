use super::RoutePattern;
use crate::stops::StopCoordinate;

/// a [`RoutePattern`] reduced to the stops found in the stop index, in
/// pattern order. always holds at least two stops.
#[derive(Debug, Clone)]
pub struct ResolvedPattern<'a> {
    pattern: RoutePattern,
    stops: Vec<&'a StopCoordinate>,
}

impl<'a> ResolvedPattern<'a> {
    /// hands the pattern back if fewer than two stops are given
    pub(super) fn new(
        pattern: RoutePattern,
        stops: Vec<&'a StopCoordinate>,
    ) -> Result<Self, RoutePattern> {
        if stops.len() < 2 {
            Err(pattern)
        } else {
            Ok(Self { pattern, stops })
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn stops(&self) -> &[&'a StopCoordinate] {
        &self.stops
    }

    pub fn first_stop(&self) -> &'a StopCoordinate {
        self.stops[0]
    }

    pub fn last_stop(&self) -> &'a StopCoordinate {
        self.stops[self.stops.len() - 1]
    }
}
