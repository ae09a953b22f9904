//! # Fee Accumulator
//!
//! Orchestrates a full fee calculation for one stay.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate(stay, carpark, category)                                     │
//! │       │                                                                 │
//! │       ├── within grace period? ──► $0.00 (no segmentation, no rules)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  segment_with(stay, calendar)      one DaySegment per calendar day      │
//! │       │                                                                 │
//! │       ▼  for each segment                                               │
//! │  rules_for(category, day_type)     weekday vs weekend/special list      │
//! │       │                                                                 │
//! │       ▼  for each rule, in list order                                   │
//! │  fit_test → matched? → cost → add  every match contributes              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round once to cents                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is the raw sum of rule costs. It is not floored at zero; a
//! validated tariff cannot produce a negative contribution, and a custom
//! [`FeeRule`] that does is reported as computed.

use serde::Serialize;

use crate::calendar::{HolidayCalendar, NoHolidays};
use crate::error::{CoreError, CoreResult};
use crate::grace::within_grace_period;
use crate::money::{Charge, Money};
use crate::observer::{FeeObserver, NoopObserver};
use crate::rules::FeeRule;
use crate::segment::segment_with;
use crate::tariff::CarPark;
use crate::types::{end_minute, start_minute, DaySegment, Stay, VehicleCategory};

// =============================================================================
// Quote
// =============================================================================

/// What one segment contributed to a fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentCharge {
    pub segment: DaySegment,
    /// Number of rules in the selected list that matched.
    pub matched_rules: usize,
    /// Unrounded contribution.
    pub charge: Charge,
}

/// The full result of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub carpark_id: String,
    pub category: VehicleCategory,
    pub stay: Stay,
    /// True when the grace period made the stay free.
    pub within_grace: bool,
    /// Empty when `within_grace` is true.
    pub segments: Vec<SegmentCharge>,
    /// Sum of every segment charge before rounding.
    pub raw_total: Charge,
    /// `raw_total` rounded to cents.
    pub total: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Fee calculator bound to a holiday calendar and an observer.
///
/// ## Example
/// ```rust
/// use chrono::NaiveTime;
/// use parkfee_core::{CarPark, FeeCalculator, Money, Stay, TariffRule, VehicleCategory};
///
/// let all_day = |rate| {
///     TariffRule::per_hour(
///         NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
///         Money::from_cents(rate),
///     )
/// };
/// let carpark = CarPark::new("cp-01", 15)
///     .with_weekday_rules(vec![all_day(200)])
///     .with_weekend_rules(vec![all_day(300)]);
///
/// let stay = Stay::parse("2024-01-10T08:00", "2024-01-10T10:30").unwrap();
/// let quote = FeeCalculator::new().calculate(&stay, &carpark, VehicleCategory::Car).unwrap();
/// assert_eq!(quote.total, Money::from_cents(600)); // 3 started hours × $2.00
/// ```
#[derive(Clone, Copy)]
pub struct FeeCalculator<'a> {
    calendar: &'a dyn HolidayCalendar,
    observer: &'a dyn FeeObserver,
}

impl Default for FeeCalculator<'_> {
    fn default() -> Self {
        FeeCalculator {
            calendar: &NoHolidays,
            observer: &NoopObserver,
        }
    }
}

impl<'a> FeeCalculator<'a> {
    /// Weekends only, no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treats dates from `calendar` as special days.
    pub fn with_calendar(mut self, calendar: &'a dyn HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Reports segment and rule events to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn FeeObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Calculates the fee for `stay` at `carpark` for `category`.
    ///
    /// ## Errors
    /// - [`CoreError::MissingRuleList`] when a segment needs a rule list the
    ///   carpark does not have
    /// - [`CoreError::SegmentationInvariantViolation`] if a segment starts
    ///   after it ends
    pub fn calculate(
        &self,
        stay: &Stay,
        carpark: &CarPark,
        category: VehicleCategory,
    ) -> CoreResult<FeeQuote> {
        if within_grace_period(stay, carpark.grace_period_in_minutes) {
            self.observer.on_grace_period(stay, carpark.grace_period_in_minutes);
            return Ok(FeeQuote {
                carpark_id: carpark.id.clone(),
                category,
                stay: *stay,
                within_grace: true,
                segments: Vec::new(),
                raw_total: Charge::zero(),
                total: Money::zero(),
            });
        }

        let mut segments = Vec::new();
        for (index, segment) in segment_with(stay, self.calendar).into_iter().enumerate() {
            check_segment(stay, index, &segment)?;

            let rules = carpark.rules_for(category, segment.day_type())?;
            self.observer.on_segment(index, &segment, rules.len());

            let (matched_rules, charge) =
                charge_segment(&segment, rules, |rule| rule.label(), self.observer);
            segments.push(SegmentCharge {
                segment,
                matched_rules,
                charge,
            });
        }

        let raw_total: Charge = segments.iter().map(|s| s.charge).sum();
        let total = raw_total.round_to_cents();
        self.observer.on_total(stay, raw_total, total);

        Ok(FeeQuote {
            carpark_id: carpark.id.clone(),
            category,
            stay: *stay,
            within_grace: false,
            segments,
            raw_total,
            total,
        })
    }
}

/// Runs every rule in `rules` against `segment`, in list order, and sums
/// the cost of each one that matches. Returns the match count and the sum.
///
/// `label` names a rule for the observer and is only called on a match.
pub fn charge_segment<R: FeeRule>(
    segment: &DaySegment,
    rules: &[R],
    label: impl Fn(&R) -> String,
    observer: &dyn FeeObserver,
) -> (usize, Charge) {
    let mut matched = 0;
    let mut total = Charge::zero();

    for (rule_index, rule) in rules.iter().enumerate() {
        let fit = rule.fit_test(segment.day_start_time(), segment.day_end_time());
        if !fit.matched {
            continue;
        }
        let charge = rule.cost(&fit);
        observer.on_rule_match(segment, rule_index, &label(rule), &fit, charge);
        matched += 1;
        total += charge;
    }

    (matched, total)
}

fn check_segment(stay: &Stay, index: usize, segment: &DaySegment) -> CoreResult<()> {
    // Compared on the billing minute axis so an entry at 23:59:30 on a
    // multi-day stay still fits before the 23:59 end-of-day marker.
    if start_minute(segment.day_start_time()) > end_minute(segment.day_end_time()) {
        return Err(CoreError::SegmentationInvariantViolation {
            entry: stay.entry().to_string(),
            exit: stay.exit().to_string(),
            index,
            start: segment.day_start_time().to_string(),
            end: segment.day_end_time().to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Contract
// =============================================================================

/// Calculates the fee for a stay given as ISO-8601 local date-time strings.
///
/// Weekends are the only special days and no observer is attached; use
/// [`FeeCalculator`] for holidays or diagnostics.
///
/// ## Errors
/// [`CoreError::InvalidTimestamp`] for unparseable or backwards input, plus
/// everything [`FeeCalculator::calculate`] returns.
pub fn calculate_fee(
    entry: &str,
    exit: &str,
    carpark: &CarPark,
    category: VehicleCategory,
) -> CoreResult<Money> {
    let stay = Stay::parse(entry, exit)?;
    Ok(FeeCalculator::new().calculate(&stay, carpark, category)?.total)
}

// =============================================================================
// Unit Tests
// =============================================================================
