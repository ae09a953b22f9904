//! # Day Segmenter
//!
//! Splits a stay into one [`DaySegment`] per calendar day it touches.
//!
//! ## Segmentation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  entry = Wed 08:00                              exit = Fri 10:00        │
//! │                                                                         │
//! │  Wed  [08:00 ─────────────── 23:59]   first day: entry time → 23:59     │
//! │  Thu  [00:00 ─────────────── 23:59]   interior days: full day           │
//! │  Fri  [00:00 ── 10:00]                last day: 00:00 → exit time       │
//! │                                                                         │
//! │  Same calendar date → exactly one segment [entry time ── exit time]     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates are compared as local calendar dates (`NaiveDate`), never by
//! elapsed 24-hour periods: 23:30 → 00:10 is two segments.

use crate::calendar::{is_weekend_or_special, HolidayCalendar, NoHolidays};
use crate::error::CoreResult;
use crate::types::{end_of_day, start_of_day, DaySegment, Stay};

/// Segments a stay given as ISO-8601 local date-time strings.
///
/// ## Example
/// ```rust
/// use parkfee_core::segment::segment_stay;
///
/// let segments = segment_stay("2024-01-10T08:00", "2024-01-12T10:00").unwrap();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].to_string(), "2024-01-11 Thu 00:00-23:59");
/// ```
///
/// ## Errors
/// [`crate::CoreError::InvalidTimestamp`] for unparseable input or a
/// stay whose exit precedes its entry.
pub fn segment_stay(entry: &str, exit: &str) -> CoreResult<Vec<DaySegment>> {
    let stay = Stay::parse(entry, exit)?;
    Ok(segment(&stay))
}

/// Segments a stay, flagging only weekends as special.
pub fn segment(stay: &Stay) -> Vec<DaySegment> {
    segment_with(stay, &NoHolidays)
}

/// Segments a stay, flagging weekends and any date `calendar` marks special.
///
/// Never returns an empty list.
pub fn segment_with(stay: &Stay, calendar: &dyn HolidayCalendar) -> Vec<DaySegment> {
    let entry_date = stay.entry().date();
    let exit_date = stay.exit().date();
    let flag = |date| is_weekend_or_special(date, calendar);

    if stay.is_same_day() {
        return vec![DaySegment::new(
            entry_date,
            stay.entry().time(),
            stay.exit().time(),
            flag(entry_date),
        )];
    }

    let mut segments = Vec::with_capacity((exit_date - entry_date).num_days() as usize + 1);
    segments.push(DaySegment::new(
        entry_date,
        stay.entry().time(),
        end_of_day(),
        flag(entry_date),
    ));

    let interior = entry_date
        .iter_days()
        .skip(1)
        .take_while(|date| *date < exit_date);
    for date in interior {
        segments.push(DaySegment::new(date, start_of_day(), end_of_day(), flag(date)));
    }

    segments.push(DaySegment::new(
        exit_date,
        start_of_day(),
        stay.exit().time(),
        flag(exit_date),
    ));

    segments
}

// =============================================================================
// Unit Tests
// =============================================================================
