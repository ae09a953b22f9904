//! # Grace Period Gate
//!
//! Decides whether a whole stay is short enough to be free.

use crate::error::CoreResult;
use crate::types::Stay;

/// Returns true when the stay lasted no more than `grace_minutes` whole
/// minutes. Partial minutes are dropped before comparing, so a stay of
/// 15m59s is within a 15 minute grace period.
pub fn within_grace_period(stay: &Stay, grace_minutes: u32) -> bool {
    stay.elapsed_minutes() <= i64::from(grace_minutes)
}

/// String contract of the gate: parses both timestamps first.
///
/// ## Example
/// ```rust
/// use parkfee_core::grace::is_within_grace_period;
///
/// assert!(is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:15", 15).unwrap());
/// assert!(!is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:16", 15).unwrap());
/// ```
///
/// ## Errors
/// [`crate::CoreError::InvalidTimestamp`] if either input cannot be parsed
/// or exit precedes entry.
pub fn is_within_grace_period(entry: &str, exit: &str, grace_minutes: u32) -> CoreResult<bool> {
    let stay = Stay::parse(entry, exit)?;
    Ok(within_grace_period(&stay, grace_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundary() {
        assert!(is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:10", 10).unwrap());
        assert!(!is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:11", 10).unwrap());
    }

    #[test]
    fn test_zero_grace() {
        assert!(is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:00", 0).unwrap());
        assert!(is_within_grace_period("2024-01-10T08:00:00", "2024-01-10T08:00:59", 0).unwrap());
        assert!(!is_within_grace_period("2024-01-10T08:00", "2024-01-10T08:01", 0).unwrap());
    }

    #[test]
    fn test_grace_spans_midnight() {
        assert!(is_within_grace_period("2024-01-10T23:55", "2024-01-11T00:05", 10).unwrap());
    }

    #[test]
    fn test_invalid_timestamps() {
        assert!(is_within_grace_period("soon", "2024-01-10T08:00", 10).is_err());
        assert!(is_within_grace_period("2024-01-10T08:00", "2024-01-10T07:00", 10).is_err());
    }

    proptest! {
        #[test]
        fn prop_exactly_grace_is_free_one_more_is_not(grace in 0u32..(3 * 24 * 60)) {
            let entry = chrono::NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap();
            let minutes = |m: i64| entry + chrono::Duration::minutes(m);
            let at_grace = Stay::new(entry, minutes(i64::from(grace))).unwrap();
            let past_grace = Stay::new(entry, minutes(i64::from(grace) + 1)).unwrap();
            prop_assert!(within_grace_period(&at_grace, grace));
            prop_assert!(!within_grace_period(&past_grace, grace));
        }
    }
}
