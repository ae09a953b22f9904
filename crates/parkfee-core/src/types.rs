//! # Domain Types
//!
//! Core domain types shared by the segmenter, the rules and the accumulator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │      Stay       │   │     DaySegment      │   │ VehicleCategory │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  entry          │──►│  date               │   │  Car (primary)  │   │
//! │  │  exit           │   │  day_start_time     │   │  Motorcycle     │   │
//! │  └─────────────────┘   │  day_end_time       │   └─────────────────┘   │
//! │                        │  is_weekend_or_     │                          │
//! │                        │    special          │   ┌─────────────────┐   │
//! │                        └─────────────────────┘   │     DayType     │   │
//! │                                                  │  Weekday        │   │
//! │                                                  │  WeekendOrSpec. │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The 23:59 Convention
//! A segment that runs to the end of its calendar day ends at `23:59`.
//! On the minute-of-day axis used for billing, `23:59` is minute 1440, the
//! close of the last billable minute, never 1439.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Minutes in a calendar day; the billing value of a 23:59 end time.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Accepted local date-time layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// First instant of a calendar day.
pub fn start_of_day() -> NaiveTime {
    NaiveTime::default()
}

/// The end-of-day marker used by segments.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}

/// Minute-of-day for a time used as a range start (floored).
pub fn start_minute(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Minute-of-day for a time used as a range end; `23:59` maps to 1440.
pub fn end_minute(time: NaiveTime) -> u32 {
    if time.hour() == 23 && time.minute() == 59 {
        MINUTES_PER_DAY
    } else {
        start_minute(time)
    }
}

/// Parses an ISO-8601 local date-time with no offset.
///
/// ## Example
/// ```rust
/// use parkfee_core::types::parse_local_timestamp;
///
/// assert!(parse_local_timestamp("entry", "2024-01-10T08:00").is_ok());
/// assert!(parse_local_timestamp("entry", "2024-01-10T08:00:30.5").is_ok());
/// assert!(parse_local_timestamp("entry", "2024-01-10T08:00+01:00").is_err());
/// ```
pub fn parse_local_timestamp(field: &str, input: &str) -> CoreResult<NaiveDateTime> {
    let trimmed = input.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            CoreError::invalid_timestamp(
                field,
                input,
                "expected a local date-time such as 2024-01-10T08:00",
            )
        })
}

// =============================================================================
// Vehicle Category
// =============================================================================

/// Vehicle category selecting which of a carpark's fee rule sets applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    /// Primary category, with separate weekday and weekend/special rules.
    #[default]
    Car,
    /// Secondary category, one unified rule list for every day type.
    Motorcycle,
}

impl VehicleCategory {
    /// Returns true for the category that carries per-day-type rule lists.
    pub fn is_primary(&self) -> bool {
        matches!(self, VehicleCategory::Car)
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Car => write!(f, "car"),
            VehicleCategory::Motorcycle => write!(f, "motorcycle"),
        }
    }
}

impl std::str::FromStr for VehicleCategory {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" | "primary" => Ok(VehicleCategory::Car),
            "motorcycle" | "motorbike" | "other" => Ok(VehicleCategory::Motorcycle),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "vehicle".to_string(),
                reason: format!("unknown category '{}', expected car or motorcycle", other),
            }),
        }
    }
}

// =============================================================================
// Day Type
// =============================================================================

/// Which rule list a segment is billed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    WeekendOrSpecial,
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Weekday => write!(f, "weekday"),
            DayType::WeekendOrSpecial => write!(f, "weekend/special"),
        }
    }
}

// =============================================================================
// Stay
// =============================================================================

/// The entry/exit pair being billed. `exit` is never before `entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stay {
    entry: NaiveDateTime,
    exit: NaiveDateTime,
}

impl Stay {
    /// Builds a stay from already-parsed timestamps.
    ///
    /// ## Errors
    /// [`CoreError::InvalidTimestamp`] when `exit` precedes `entry`.
    pub fn new(entry: NaiveDateTime, exit: NaiveDateTime) -> CoreResult<Self> {
        if exit < entry {
            return Err(CoreError::invalid_timestamp(
                "exit",
                exit.to_string(),
                format!("exit precedes entry {}", entry),
            ));
        }
        Ok(Stay { entry, exit })
    }

    /// Parses both ends of a stay from ISO-8601 local date-time strings.
    ///
    /// ## Example
    /// ```rust
    /// use parkfee_core::types::Stay;
    ///
    /// let stay = Stay::parse("2024-01-10T08:00", "2024-01-12T10:00").unwrap();
    /// assert_eq!(stay.elapsed_minutes(), 2 * 24 * 60 + 120);
    ///
    /// assert!(Stay::parse("2024-01-10T10:00", "2024-01-10T08:00").is_err());
    /// ```
    pub fn parse(entry: &str, exit: &str) -> CoreResult<Self> {
        let entry = parse_local_timestamp("entry", entry)?;
        let exit = parse_local_timestamp("exit", exit)?;
        Stay::new(entry, exit)
    }

    pub fn entry(&self) -> NaiveDateTime {
        self.entry
    }

    pub fn exit(&self) -> NaiveDateTime {
        self.exit
    }

    /// Whole minutes between entry and exit; partial minutes are dropped.
    pub fn elapsed_minutes(&self) -> i64 {
        (self.exit - self.entry).num_minutes()
    }

    /// True when entry and exit share a local calendar date.
    pub fn is_same_day(&self) -> bool {
        self.entry.date() == self.exit.date()
    }
}

impl fmt::Display for Stay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.entry.format("%Y-%m-%dT%H:%M:%S"),
            self.exit.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}

// =============================================================================
// Day Segment
// =============================================================================

/// One calendar day's portion of a stay. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySegment {
    date: NaiveDate,
    day_start_time: NaiveTime,
    day_end_time: NaiveTime,
    is_weekend_or_special: bool,
}

impl DaySegment {
    pub fn new(
        date: NaiveDate,
        day_start_time: NaiveTime,
        day_end_time: NaiveTime,
        is_weekend_or_special: bool,
    ) -> Self {
        DaySegment {
            date,
            day_start_time,
            day_end_time,
            is_weekend_or_special,
        }
    }

    /// Calendar date this segment belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_start_time(&self) -> NaiveTime {
        self.day_start_time
    }

    pub fn day_end_time(&self) -> NaiveTime {
        self.day_end_time
    }

    pub fn is_weekend_or_special(&self) -> bool {
        self.is_weekend_or_special
    }

    /// Rule list family this segment is billed against.
    pub fn day_type(&self) -> DayType {
        if self.is_weekend_or_special {
            DayType::WeekendOrSpecial
        } else {
            DayType::Weekday
        }
    }

    /// Billable minutes covered by the segment, 23:59 counting as day end.
    pub fn billable_minutes(&self) -> u32 {
        end_minute(self.day_end_time).saturating_sub(start_minute(self.day_start_time))
    }
}

impl fmt::Display for DaySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{}{}",
            self.date,
            self.date.format("%a"),
            self.day_start_time.format("%H:%M"),
            self.day_end_time.format("%H:%M"),
            if self.is_weekend_or_special {
                " (weekend/special)"
            } else {
                ""
            }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_accepts_local_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        for input in [
            "2024-01-10T08:00",
            "2024-01-10T08:00:00",
            "2024-01-10T08:00:00.000",
            "2024-01-10 08:00",
            " 2024-01-10T08:00 ",
        ] {
            assert_eq!(parse_local_timestamp("entry", input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "2024-01-10", "08:00", "2024-13-01T08:00", "2024-01-10T08:00Z"] {
            let err = parse_local_timestamp("entry", input).unwrap_err();
            assert!(matches!(err, CoreError::InvalidTimestamp { .. }), "{input}");
        }
    }

    #[test]
    fn test_stay_rejects_backwards() {
        let err = Stay::parse("2024-01-10T10:00", "2024-01-10T09:59").unwrap_err();
        match err {
            CoreError::InvalidTimestamp { field, .. } => assert_eq!(field, "exit"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Stay::parse("2024-01-10T10:00", "2024-01-10T10:00").is_ok());
    }

    #[test]
    fn test_elapsed_minutes_truncates_seconds() {
        let stay = Stay::parse("2024-01-10T08:00:00", "2024-01-10T08:15:59").unwrap();
        assert_eq!(stay.elapsed_minutes(), 15);
    }

    #[test]
    fn test_same_day_uses_calendar_date() {
        // Under 24 hours apart but different dates
        let stay = Stay::parse("2024-01-10T23:30", "2024-01-11T00:10").unwrap();
        assert!(!stay.is_same_day());
        let stay = Stay::parse("2024-01-10T00:00", "2024-01-10T23:59").unwrap();
        assert!(stay.is_same_day());
    }

    #[test]
    fn test_end_of_day_counts_as_1440() {
        assert_eq!(end_minute(end_of_day()), MINUTES_PER_DAY);
        assert_eq!(end_minute(time(10, 0)), 600);
        assert_eq!(start_minute(time(23, 59)), 1439);

        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let full = DaySegment::new(date, start_of_day(), end_of_day(), false);
        assert_eq!(full.billable_minutes(), MINUTES_PER_DAY);
    }

    #[test]
    fn test_vehicle_category_parsing() {
        assert_eq!("car".parse::<VehicleCategory>().unwrap(), VehicleCategory::Car);
        assert_eq!("PRIMARY".parse::<VehicleCategory>().unwrap(), VehicleCategory::Car);
        assert_eq!(
            "motorbike".parse::<VehicleCategory>().unwrap(),
            VehicleCategory::Motorcycle
        );
        assert!("truck".parse::<VehicleCategory>().is_err());
        assert_eq!(VehicleCategory::default(), VehicleCategory::Car);
    }

    #[test]
    fn test_segment_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        let segment = DaySegment::new(date, time(8, 0), time(10, 30), true);
        assert_eq!(segment.to_string(), "2024-01-13 Sat 08:00-10:30 (weekend/special)");
        assert_eq!(segment.day_type(), DayType::WeekendOrSpecial);
    }
}
