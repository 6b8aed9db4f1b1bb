//! Civil wall-clock date/time at the fixed +09:00 offset.
//!
//! All chart and boundary arithmetic happens in this local frame; there is
//! no time-zone database and no daylight-saving handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MINUTES_PER_DAY, days_in_month, gregorian_to_jdn, jdn_to_gregorian};

/// Fixed offset of the civil frame from UTC, in minutes.
pub const UTC_OFFSET_MINUTES: i32 = 540;

/// Earliest and latest accepted civil year.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9_999;

/// Local civil date and time with minute resolution.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl LocalDateTime {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, TimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimeError::invalid(format!("year {year} out of range")));
        }
        if !(1..=12).contains(&month) {
            return Err(TimeError::invalid(format!("month {month} out of range")));
        }
        let dim = days_in_month(year, month);
        if day == 0 || day > dim {
            return Err(TimeError::invalid(format!(
                "day {day} out of range for {year:04}-{month:02}"
            )));
        }
        if hour > 23 {
            return Err(TimeError::invalid(format!("hour {hour} out of range")));
        }
        if minute > 59 {
            return Err(TimeError::invalid(format!("minute {minute} out of range")));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// Midnight at the start of a civil date.
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::new(year, month, day, 0, 0)
    }

    /// Parse a `YYYY-MM-DD` date and an `HH:MM` time.
    pub fn parse(date: &str, time: &str) -> Result<Self, TimeError> {
        let (year, month, day) = parse_date(date)?;
        let (hour, minute) = parse_clock(time)?;
        Self::new(year, month, day, hour, minute)
    }

    /// Parse `YYYY-MM-DDTHH:MM` (a space also separates date and time).
    pub fn parse_iso(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let s = s.strip_suffix("+09:00").unwrap_or(s);
        let (date, time) = s
            .split_once(['T', ' '])
            .ok_or_else(|| TimeError::invalid(format!("expected YYYY-MM-DDTHH:MM, got '{s}'")))?;
        Self::parse(date, time)
    }

    /// Julian Day Number of the civil date.
    pub fn jdn(&self) -> i64 {
        gregorian_to_jdn(self.year, self.month, self.day)
    }

    /// Minutes elapsed since local midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Absolute minute count (JDN-based) usable for differences.
    pub fn to_minutes(&self) -> i64 {
        self.jdn() * MINUTES_PER_DAY + self.minute_of_day() as i64
    }

    /// Inverse of [`to_minutes`](Self::to_minutes).
    pub fn from_minutes(total: i64) -> Self {
        let jdn = total.div_euclid(MINUTES_PER_DAY);
        let mod_day = total.rem_euclid(MINUTES_PER_DAY) as u32;
        let (year, month, day) = jdn_to_gregorian(jdn);
        Self {
            year,
            month,
            day,
            hour: mod_day / 60,
            minute: mod_day % 60,
        }
    }

    /// Shift by a signed number of minutes.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self::from_minutes(self.to_minutes() + minutes)
    }

    /// Signed minutes from `self` to `later`.
    pub fn minutes_until(&self, later: &Self) -> i64 {
        later.to_minutes() - self.to_minutes()
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}+09:00",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

fn parse_date(s: &str) -> Result<(i32, u32, u32), TimeError> {
    let mut parts = s.trim().split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimeError::invalid(format!("expected YYYY-MM-DD, got '{s}'")));
    };
    Ok((parse_num(y, "year")?, parse_num(m, "month")?, parse_num(d, "day")?))
}

fn parse_clock(s: &str) -> Result<(u32, u32), TimeError> {
    let Some((h, m)) = s.trim().split_once(':') else {
        return Err(TimeError::invalid(format!("expected HH:MM, got '{s}'")));
    };
    Ok((parse_num(h, "hour")?, parse_num(m, "minute")?))
}

fn parse_num<T: std::str::FromStr>(s: &str, field: &str) -> Result<T, TimeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::invalid(format!("{field} '{s}' is not a number")));
    }
    s.parse()
        .map_err(|_| TimeError::invalid(format!("{field} '{s}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let t = LocalDateTime::parse("2024-02-04", "10:05").unwrap();
        assert_eq!((t.year, t.month, t.day, t.hour, t.minute), (2024, 2, 4, 10, 5));
    }

    #[test]
    fn parse_iso_forms() {
        let a = LocalDateTime::parse_iso("2024-02-04T10:05").unwrap();
        let b = LocalDateTime::parse_iso("2024-02-04 10:05").unwrap();
        let c = LocalDateTime::parse_iso("2024-02-04T10:05+09:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn reject_impossible_dates() {
        assert!(LocalDateTime::parse("2023-02-29", "00:00").is_err());
        assert!(LocalDateTime::parse("2024-13-01", "00:00").is_err());
        assert!(LocalDateTime::parse("2024-01-01", "24:00").is_err());
        assert!(LocalDateTime::parse("2024-01-01", "12:60").is_err());
    }

    #[test]
    fn reject_malformed_text() {
        assert!(LocalDateTime::parse("2024/01/01", "00:00").is_err());
        assert!(LocalDateTime::parse("2024-01-01", "noon").is_err());
        assert!(LocalDateTime::parse("2024-01", "00:00").is_err());
        assert!(LocalDateTime::parse("2024-01-01", "-1:00").is_err());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = LocalDateTime::new(2024, 1, 31, 23, 59).unwrap();
        let b = LocalDateTime::new(2024, 2, 1, 0, 0).unwrap();
        assert!(a < b);
        assert_eq!(a.minutes_until(&b), 1);
    }

    #[test]
    fn add_minutes_crosses_year() {
        let t = LocalDateTime::new(2023, 12, 31, 23, 30).unwrap();
        let u = t.add_minutes(45);
        assert_eq!(u, LocalDateTime::new(2024, 1, 1, 0, 15).unwrap());
        assert_eq!(u.add_minutes(-45), t);
    }

    #[test]
    fn display_has_offset() {
        let t = LocalDateTime::new(2024, 2, 4, 9, 7).unwrap();
        assert_eq!(t.to_string(), "2024-02-04T09:07+09:00");
    }
}
