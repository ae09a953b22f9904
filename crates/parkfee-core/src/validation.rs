//! # Validation Module
//!
//! Tariff validation, run when a carpark is loaded and before any fee is
//! calculated against it.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Rule kinds, HH:MM times, integer cents                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── ids present, grace period within a day                            │
//! │  └── forward windows, no negative money                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculation (parkfee-core::calculator)                       │
//! │  └── MissingRuleList, segmentation invariant                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A carpark that passes [`validate_carpark`] can never produce a negative
//! fee: every rule cost is zero or positive, and amounts are capped at
//! [`MAX_AMOUNT_CENTS`] so no sum comes near the `i64` range.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::rules::{Pricing, TariffRule};
use crate::tariff::CarPark;
use crate::types::MINUTES_PER_DAY;

/// Largest amount, rate or cap a rule may carry: $1,000,000.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a carpark id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters of letters, digits, `-` and `_`
///
/// ## Example
/// ```rust
/// use parkfee_core::validation::validate_carpark_id;
///
/// assert!(validate_carpark_id("harbour-01").is_ok());
/// assert!(validate_carpark_id("").is_err());
/// assert!(validate_carpark_id("has space").is_err());
/// ```
pub fn validate_carpark_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "carpark.id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::OutOfRange {
            field: "carpark.id length".to_string(),
            min: 1,
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "carpark.id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a grace period: 0 to 1440 minutes.
pub fn validate_grace_period(minutes: u32) -> ValidationResult<()> {
    if minutes > MINUTES_PER_DAY {
        return Err(ValidationError::OutOfRange {
            field: "grace_period_in_minutes".to_string(),
            min: 0,
            max: i64::from(MINUTES_PER_DAY),
        });
    }
    Ok(())
}

fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if amount.cents() > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }
    Ok(())
}

/// Validates one rule; `field` locates it in error messages.
///
/// ## Rules
/// - The window must run forward: `from` before `to` (23:59 = end of day)
/// - Amounts, rates and caps must lie in `0..=MAX_AMOUNT_CENTS`
pub fn validate_rule(field: &str, rule: &TariffRule) -> ValidationResult<()> {
    let (start, end) = rule.window_minutes();
    if start >= end {
        return Err(ValidationError::EmptyWindow {
            field: field.to_string(),
            from: rule.from.format("%H:%M").to_string(),
            to: rule.to.format("%H:%M").to_string(),
        });
    }

    match rule.pricing {
        Pricing::Flat { amount_cents } => {
            validate_amount(&format!("{}.amount_cents", field), amount_cents)
        }
        Pricing::PerHour { rate_cents, .. } => {
            validate_amount(&format!("{}.rate_cents", field), rate_cents)
        }
        Pricing::Capped {
            rate_cents,
            cap_cents,
        } => {
            validate_amount(&format!("{}.rate_cents", field), rate_cents)?;
            validate_amount(&format!("{}.cap_cents", field), cap_cents)
        }
        Pricing::FreeBlock => Ok(()),
    }
}

/// Validates a whole carpark: id, grace period and every rule list.
pub fn validate_carpark(carpark: &CarPark) -> ValidationResult<()> {
    validate_carpark_id(&carpark.id)?;
    validate_grace_period(carpark.grace_period_in_minutes)?;

    for (path, rules) in carpark.rule_lists() {
        for (index, rule) in rules.iter().enumerate() {
            validate_rule(&format!("{}.{}[{}]", carpark.id, path, index), rule)?;
        }
    }

    Ok(())
}

/// Validates a set of carparks, including id uniqueness.
pub fn validate_carparks<'a>(
    carparks: impl IntoIterator<Item = &'a CarPark>,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for carpark in carparks {
        validate_carpark(carpark)?;
        if !seen.insert(carpark.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "carpark.id".to_string(),
                value: carpark.id.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn hourly() -> TariffRule {
        TariffRule::per_hour(time(7, 0), time(19, 0), Money::from_cents(250))
    }

    #[test]
    fn test_validate_carpark_id() {
        assert!(validate_carpark_id("cp-01").is_ok());
        assert!(validate_carpark_id("north_garage").is_ok());
        assert!(validate_carpark_id("   ").is_err());
        assert!(validate_carpark_id(&"A".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_grace_period() {
        assert!(validate_grace_period(0).is_ok());
        assert!(validate_grace_period(1440).is_ok());
        assert!(validate_grace_period(1441).is_err());
    }

    #[test]
    fn test_validate_rule_windows() {
        assert!(validate_rule("r", &hourly()).is_ok());
        assert!(validate_rule("r", &TariffRule::free_block(time(0, 0), time(23, 59))).is_ok());

        let reversed = TariffRule::flat(time(19, 0), time(7, 0), Money::from_cents(100));
        assert!(matches!(
            validate_rule("r", &reversed),
            Err(ValidationError::EmptyWindow { .. })
        ));

        let empty = TariffRule::flat(time(7, 0), time(7, 0), Money::from_cents(100));
        assert!(validate_rule("r", &empty).is_err());
    }

    #[test]
    fn test_validate_rule_money() {
        let negative = TariffRule::capped(
            time(0, 0),
            time(23, 59),
            Money::from_cents(100),
            Money::from_cents(-1),
        );
        match validate_rule("cp.rules[2]", &negative) {
            Err(ValidationError::Negative { field }) => assert_eq!(field, "cp.rules[2].cap_cents"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(validate_rule(
            "r",
            &TariffRule::flat(time(0, 0), time(23, 59), Money::zero())
        )
        .is_ok());
    }

    #[test]
    fn test_validate_rule_rejects_overflowing_amounts() {
        let huge = TariffRule::flat(
            time(0, 0),
            time(23, 59),
            Money::from_cents(1_000_000_000_000_000_000),
        );
        let carpark = CarPark::new("cp-01", 0).with_weekday_rules(vec![huge]);
        match validate_carpark(&carpark) {
            Err(ValidationError::OutOfRange { field, max, .. }) => {
                assert_eq!(field, "cp-01.car_fee.weekday_fee_rules[0].amount_cents");
                assert_eq!(max, MAX_AMOUNT_CENTS);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let ceiling =
            TariffRule::per_hour(time(0, 0), time(23, 59), Money::from_cents(MAX_AMOUNT_CENTS));
        assert!(validate_rule("r", &ceiling).is_ok());
    }

    #[test]
    fn test_validate_carpark_reports_rule_path() {
        let bad = TariffRule::per_hour(time(0, 0), time(23, 59), Money::from_cents(-5));
        let carpark = CarPark::new("cp-01", 15)
            .with_weekday_rules(vec![hourly()])
            .with_weekend_rules(vec![hourly(), bad]);

        let err = validate_carpark(&carpark).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cp-01.car_fee.weekend_ph_fee_rules[1].rate_cents must not be negative"
        );
    }

    #[test]
    fn test_validate_carparks_rejects_duplicates() {
        let a = CarPark::new("cp-01", 0);
        let b = CarPark::new("cp-02", 0);
        assert!(validate_carparks([&a, &b]).is_ok());
        assert!(matches!(
            validate_carparks([&a, &b, &a]),
            Err(ValidationError::Duplicate { .. })
        ));
    }
}
