//! Time-of-day handling for fare and duration tables.
//!
//! Time categories are defined by "HH:MM" interval strings. This module
//! parses them into minute offsets so that interval checks are plain
//! integer comparisons, and parses the "YYYY-MM-DD HH:MM" query timestamp.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Format of a query timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format of an opening date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute resolution.
///
/// Stored as minutes since midnight. `24:00` is accepted so that intervals
/// can end at the end of the day.
///
/// # Examples
///
/// ```
/// use mrt_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_hhmm("06:30").unwrap();
/// assert_eq!(t.minutes(), 390);
/// assert_eq!(t.to_string(), "06:30");
///
/// assert!(TimeOfDay::parse_hhmm("24:00").is_ok());
/// assert!(TimeOfDay::parse_hhmm("24:01").is_err());
/// assert!(TimeOfDay::parse_hhmm("6:30").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let minutes = hour * 60 + minute;
        if minutes > MINUTES_PER_DAY {
            return Err(TimeError::new("time must be at most 24:00"));
        }

        Ok(Self(minutes))
    }

    /// The time of day of a clock instant.
    pub fn of(instant: NaiveDateTime) -> Self {
        // hour() <= 23 and minute() <= 59, so this always fits
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A half-open `[start, end)` time-of-day interval.
///
/// An interval whose start is later than its end wraps past midnight,
/// so `22:00-06:00` covers late evening and early morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parse an interval from "HH:MM-HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrt_server::domain::{TimeInterval, TimeOfDay};
    ///
    /// let peak = TimeInterval::parse("06:00-09:00").unwrap();
    /// assert!(peak.contains(TimeOfDay::parse_hhmm("06:00").unwrap()));
    /// assert!(!peak.contains(TimeOfDay::parse_hhmm("09:00").unwrap()));
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| TimeError::new("expected HH:MM-HH:MM interval"))?;
        Ok(Self {
            start: TimeOfDay::parse_hhmm(start.trim())?,
            end: TimeOfDay::parse_hhmm(end.trim())?,
        })
    }

    /// Returns true if `t` falls inside the interval.
    pub fn contains(&self, t: TimeOfDay) -> bool {
        if self.start <= self.end {
            self.start <= t && t < self.end
        } else {
            t >= self.start || t < self.end
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parse a query timestamp in "YYYY-MM-DD HH:MM" format.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| TimeError::new("expected YYYY-MM-DD HH:MM timestamp"))
}

/// Parse an opening date in "YYYY-MM-DD" format.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TimeError::new("expected YYYY-MM-DD date"))
}

/// Weekday index of an instant, Monday = 0 through Sunday = 6.
pub fn weekday_index(instant: NaiveDateTime) -> u8 {
    instant.weekday().num_days_from_monday() as u8
}

/// Parse two ASCII digit bytes into a u16.
fn parse_two_digits(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as u16)
}
