use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// named periods of the service day used to profile when a route runs.
/// periods overlap, so a single departure can fall in more than one band.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    /// 07:00 to 09:00
    MorningSchool,
    /// 06:30 to 09:30
    MorningCommute,
    /// 09:30 to 15:00
    Midday,
    /// 15:00 to 17:00
    AfternoonSchool,
    /// 16:30 to 19:00
    EveningCommute,
    /// 19:00 to 23:00
    Evening,
    /// 23:00 to 06:30, across midnight
    Night,
}

impl TimeBand {
    pub const ALL: [TimeBand; 7] = [
        TimeBand::MorningSchool,
        TimeBand::MorningCommute,
        TimeBand::Midday,
        TimeBand::AfternoonSchool,
        TimeBand::EveningCommute,
        TimeBand::Evening,
        TimeBand::Night,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TimeBand::MorningSchool => "morning_school",
            TimeBand::MorningCommute => "morning_commute",
            TimeBand::Midday => "midday",
            TimeBand::AfternoonSchool => "afternoon_school",
            TimeBand::EveningCommute => "evening_commute",
            TimeBand::Evening => "evening",
            TimeBand::Night => "night",
        }
    }

    /// position of this band in [`TimeBand::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// start and end of the band in minutes after midnight. the start is
    /// inclusive and the end exclusive. a start after the end wraps midnight.
    fn bounds(&self) -> (u32, u32) {
        match self {
            TimeBand::MorningSchool => (7 * 60, 9 * 60),
            TimeBand::MorningCommute => (6 * 60 + 30, 9 * 60 + 30),
            TimeBand::Midday => (9 * 60 + 30, 15 * 60),
            TimeBand::AfternoonSchool => (15 * 60, 17 * 60),
            TimeBand::EveningCommute => (16 * 60 + 30, 19 * 60),
            TimeBand::Evening => (19 * 60, 23 * 60),
            TimeBand::Night => (23 * 60, 6 * 60 + 30),
        }
    }

    pub fn contains(&self, time: &NaiveTime) -> bool {
        let minute = time.hour() * 60 + time.minute();
        let (start, end) = self.bounds();
        if start <= end {
            start <= minute && minute < end
        } else {
            minute >= start || minute < end
        }
    }

    /// every band the time falls in
    pub fn classify(time: &NaiveTime) -> impl Iterator<Item = TimeBand> + '_ {
        TimeBand::ALL.into_iter().filter(move |b| b.contains(time))
    }
}

/// reads a departure time written as HH:MM or HH:MM:SS. None when unparseable.
pub fn parse_departure_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}
