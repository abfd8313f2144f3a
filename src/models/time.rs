//! Weekly time coordinates.
//!
//! Maps wall-clock positions within a week to [`Unit`] indices and back.
//!
//! # Time Model
//! Minute 0 is Monday 00:00. A [`TimeGrid`] slices the week into units of
//! `minutes_per_unit` minutes; unit `u` covers minutes
//! `[u * minutes_per_unit, (u + 1) * minutes_per_unit)`.
//!
//! Wall-clock dates are only produced at the boundary, relative to an
//! anchor Monday (see [`this_monday`]).

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Interval, Unit};
use crate::error::PersonDataError;

/// Minutes in one week.
pub const MINUTES_PER_WEEK: u32 = 7 * 24 * 60;

const DAY_LETTERS: [char; 7] = ['M', 'T', 'W', 'R', 'F', 'S', 'U'];

/// Time granularity of the weekly timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Length of one unit in minutes. Must divide 60.
    pub minutes_per_unit: u32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            minutes_per_unit: 30,
        }
    }
}

impl TimeGrid {
    /// Creates a grid with the given unit length.
    ///
    /// The length is checked by [`is_valid`](Self::is_valid), which
    /// [`assemble`](crate::assembler::assemble) calls before converting times.
    pub fn new(minutes_per_unit: u32) -> Self {
        Self { minutes_per_unit }
    }

    /// Whether the unit length is positive and divides an hour.
    pub fn is_valid(&self) -> bool {
        self.minutes_per_unit > 0 && 60 % self.minutes_per_unit == 0
    }

    /// Units in one hour (0 for a zero-length unit).
    #[inline]
    pub fn units_per_hour(&self) -> u32 {
        60u32.checked_div(self.minutes_per_unit).unwrap_or(0)
    }

    /// Units in one week: the length of the timeline.
    #[inline]
    pub fn units_per_week(&self) -> Unit {
        MINUTES_PER_WEEK.checked_div(self.minutes_per_unit).unwrap_or(0)
    }

    /// Converts a minute offset to a unit index.
    ///
    /// Fails if the offset is not aligned to the grid, or if the grid has
    /// a zero-length unit.
    pub fn unit_from_minutes(&self, minutes: u32) -> Result<Unit, PersonDataError> {
        match minutes.checked_rem(self.minutes_per_unit) {
            Some(0) => Ok(minutes / self.minutes_per_unit),
            _ => Err(PersonDataError::MisalignedTime {
                minutes,
                minutes_per_unit: self.minutes_per_unit,
            }),
        }
    }

    /// Minute offset of the start of a unit.
    #[inline]
    pub fn minutes_from_unit(&self, unit: Unit) -> u32 {
        unit * self.minutes_per_unit
    }

    /// Converts a `[start, end)` minute range into a unit interval.
    pub fn interval_from_minutes(&self, start: u32, end: u32) -> Result<Interval, PersonDataError> {
        Ok(Interval::new(
            self.unit_from_minutes(start)?,
            self.unit_from_minutes(end)?,
        ))
    }

    /// Converts a number of minutes to a whole number of units, rounding up.
    pub fn units_for_duration(&self, minutes: u32) -> Unit {
        if self.minutes_per_unit == 0 {
            return 0;
        }
        minutes.div_ceil(self.minutes_per_unit)
    }

    /// Day, hour and minute of a unit.
    pub fn weekly_time(&self, unit: Unit) -> WeeklyTime {
        WeeklyTime::from_minutes(self.minutes_from_unit(unit))
    }

    /// Wall-clock instant of a unit, relative to an anchor Monday.
    pub fn to_datetime(&self, anchor: DateTime<Utc>, unit: Unit) -> DateTime<Utc> {
        anchor + Duration::minutes(i64::from(self.minutes_from_unit(unit)))
    }
}

/// A position within the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTime {
    /// Day index, 0 = Monday.
    pub day: u32,
    /// Hour of day (0-23).
    pub hour: u32,
    /// Minute of hour (0-59).
    pub minute: u32,
}

impl WeeklyTime {
    /// Splits minutes since Monday 00:00 into day, hour and minute.
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            day: minutes / (24 * 60),
            hour: (minutes / 60) % 24,
            minute: minutes % 60,
        }
    }

    /// Minutes since Monday 00:00.
    pub fn to_minutes(&self) -> u32 {
        (self.day * 24 + self.hour) * 60 + self.minute
    }
}

impl fmt::Display for WeeklyTime {
    /// Formats as day letter plus `HH:MM`, e.g. `R09:30` for Thursday 9:30.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = DAY_LETTERS.get(self.day as usize).copied().unwrap_or('?');
        write!(f, "{letter}{:02}:{:02}", self.hour, self.minute)
    }
}

/// Monday 00:00 UTC of the week containing `instant`.
pub fn this_monday(instant: DateTime<Utc>) -> DateTime<Utc> {
    let days_from_monday = i64::from(instant.weekday().num_days_from_monday());
    let date = instant.date_naive() - Duration::days(days_from_monday);
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Resolves a raw `[start, end)` pair that may wrap past the week boundary.
///
/// An interval whose end lies before its start is taken to run until the
/// end of the week; the part after the wrap is dropped. This is an
/// approximation kept for compatibility with existing availability data.
pub fn clamp_to_week(start: Unit, end: Unit, week_len: Unit) -> Interval {
    if start > end {
        tracing::warn!(
            start,
            end,
            week_len,
            "interval wraps past the week boundary, clamping end to week length"
        );
        return Interval::new(start, week_len);
    }
    Interval::new(start, end)
}
