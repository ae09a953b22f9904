//! # Calendar
//!
//! Weekend detection plus the seam through which a public-holiday calendar
//! can mark extra dates as special.
//!
//! The core only guarantees the weekend half of the "weekend or special"
//! flag. Which dates are public holidays is decided by whoever implements
//! [`HolidayCalendar`].

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// True iff `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Source of special (public holiday) dates.
pub trait HolidayCalendar {
    /// Returns true when `date` should be billed as a special day.
    fn is_special_day(&self, date: NaiveDate) -> bool;
}

/// A calendar with no holidays: only weekends are special.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_special_day(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// A fixed set of holiday dates, typically loaded from a tariff file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        FixedHolidays {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_special_day(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

impl<C: HolidayCalendar + ?Sized> HolidayCalendar for &C {
    fn is_special_day(&self, date: NaiveDate) -> bool {
        (**self).is_special_day(date)
    }
}

/// Weekend check ORed with the holiday calendar.
pub fn is_weekend_or_special(date: NaiveDate, calendar: &dyn HolidayCalendar) -> bool {
    is_weekend(date) || calendar.is_special_day(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_days() {
        assert!(is_weekend(date(2024, 1, 13))); // Saturday
        assert!(is_weekend(date(2024, 1, 14))); // Sunday
        assert!(!is_weekend(date(2024, 1, 15))); // Monday
        assert!(!is_weekend(date(2024, 1, 12))); // Friday
    }

    #[test]
    fn test_fixed_holidays_upgrade_weekdays() {
        let christmas = date(2024, 12, 25); // Wednesday
        let calendar = FixedHolidays::new([christmas]);

        assert!(!is_weekend(christmas));
        assert!(is_weekend_or_special(christmas, &calendar));
        assert!(!is_weekend_or_special(date(2024, 12, 24), &calendar));
        assert!(is_weekend_or_special(date(2024, 12, 28), &NoHolidays));
    }

    #[test]
    fn test_fixed_holidays_dedupe() {
        let mut calendar = FixedHolidays::new([date(2024, 1, 1), date(2024, 1, 1)]);
        assert_eq!(calendar.len(), 1);
        assert!(!calendar.insert(date(2024, 1, 1)));
        assert!(calendar.insert(date(2024, 4, 25)));
    }
}
