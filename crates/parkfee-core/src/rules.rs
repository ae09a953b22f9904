//! # Fee Rules
//!
//! The capability every tariff rule exposes to the accumulator, and the
//! rule kinds a tariff file can describe.
//!
//! ## Rule Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FeeRule                                         │
//! │                                                                         │
//! │  fit_test(day_start, day_end) ──► FitResult { matched, overlap, mins }  │
//! │                                          │                              │
//! │                                          ▼ (only if matched)            │
//! │  cost(&FitResult)             ──► Charge                                │
//! │                                                                         │
//! │  The accumulator never looks inside a rule's pricing.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Kinds
//! | kind         | cost when matched                                   |
//! |--------------|-----------------------------------------------------|
//! | `flat`       | `amount_cents` once per matching segment            |
//! | `per_hour`   | `rate_cents` per started hour, or prorated by minute |
//! | `capped`     | `rate_cents` per started hour, at most `cap_cents`  |
//! | `free_block` | nothing; marks a free window                         |
//!
//! Every kind is limited to a daily window `from`-`to`. Overlap is measured
//! on the billing minute axis where `23:59` closes the day (minute 1440).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::money::{Charge, Money};
use crate::types::{end_minute, end_of_day, start_minute, start_of_day};

// =============================================================================
// Fit Result
// =============================================================================

/// Outcome of testing a rule against a segment's time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitResult {
    /// True when the segment and the rule window overlap by at least a minute.
    pub matched: bool,
    /// Overlap start, minute of day.
    pub start_minute: u32,
    /// Overlap end, minute of day (1440 = end of day).
    pub end_minute: u32,
    /// Overlap length in minutes.
    pub minutes: u32,
}

impl FitResult {
    /// A result that never contributes.
    pub const fn no_match() -> Self {
        FitResult {
            matched: false,
            start_minute: 0,
            end_minute: 0,
            minutes: 0,
        }
    }

    /// Overlap of `[a_start, a_end)` and `[b_start, b_end)` in minutes of day.
    pub fn overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> Self {
        let start = a_start.max(b_start);
        let end = a_end.min(b_end);
        if end <= start {
            return FitResult::no_match();
        }
        FitResult {
            matched: true,
            start_minute: start,
            end_minute: end,
            minutes: end - start,
        }
    }

    /// Started hours of overlap (61 minutes is 2 hours).
    pub fn started_hours(&self) -> i64 {
        i64::from(self.minutes.div_ceil(60))
    }
}

// =============================================================================
// Fee Rule Capability
// =============================================================================

/// A pricing rule as seen by the fee accumulator.
///
/// Implemented by [`TariffRule`] for configured tariffs; hosts may implement
/// it for rule kinds of their own.
pub trait FeeRule {
    /// Tests whether this rule applies to the segment `day_start`-`day_end`.
    fn fit_test(&self, day_start: NaiveTime, day_end: NaiveTime) -> FitResult;

    /// Cost of a matched fit. Only called when `fit.matched` is true.
    fn cost(&self, fit: &FitResult) -> Charge;
}

impl<R: FeeRule + ?Sized> FeeRule for &R {
    fn fit_test(&self, day_start: NaiveTime, day_end: NaiveTime) -> FitResult {
        (**self).fit_test(day_start, day_end)
    }

    fn cost(&self, fit: &FitResult) -> Charge {
        (**self).cost(fit)
    }
}

// =============================================================================
// Configured Rules
// =============================================================================

/// How a configured rule prices its overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pricing {
    /// Fixed amount per matching segment.
    Flat { amount_cents: Money },
    /// Rate per started hour; `prorate` bills by the minute instead.
    PerHour {
        rate_cents: Money,
        #[serde(default)]
        prorate: bool,
    },
    /// Rate per started hour, never more than `cap_cents` per segment.
    Capped { rate_cents: Money, cap_cents: Money },
    /// A window that is explicitly free.
    FreeBlock,
}

/// A rule as it appears in a tariff file.
///
/// ```toml
/// name = "daytime"
/// kind = "per_hour"
/// from = "07:00"
/// to = "19:00"
/// rate_cents = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRule {
    /// Optional label used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Window start (inclusive). Defaults to 00:00.
    #[serde(default = "start_of_day", with = "hhmm")]
    pub from: NaiveTime,

    /// Window end. `23:59` means end of day, and is the default.
    #[serde(default = "end_of_day", with = "hhmm")]
    pub to: NaiveTime,

    #[serde(flatten)]
    pub pricing: Pricing,
}

impl TariffRule {
    pub fn new(from: NaiveTime, to: NaiveTime, pricing: Pricing) -> Self {
        TariffRule {
            name: None,
            from,
            to,
            pricing,
        }
    }

    /// Fixed `amount` whenever a segment touches the window.
    pub fn flat(from: NaiveTime, to: NaiveTime, amount: Money) -> Self {
        Self::new(from, to, Pricing::Flat { amount_cents: amount })
    }

    /// `rate` per started hour inside the window.
    pub fn per_hour(from: NaiveTime, to: NaiveTime, rate: Money) -> Self {
        Self::new(
            from,
            to,
            Pricing::PerHour {
                rate_cents: rate,
                prorate: false,
            },
        )
    }

    /// `rate` per hour inside the window, billed by the minute.
    pub fn prorated(from: NaiveTime, to: NaiveTime, rate: Money) -> Self {
        Self::new(
            from,
            to,
            Pricing::PerHour {
                rate_cents: rate,
                prorate: true,
            },
        )
    }

    /// `rate` per started hour, at most `cap` per segment.
    pub fn capped(from: NaiveTime, to: NaiveTime, rate: Money, cap: Money) -> Self {
        Self::new(
            from,
            to,
            Pricing::Capped {
                rate_cents: rate,
                cap_cents: cap,
            },
        )
    }

    pub fn free_block(from: NaiveTime, to: NaiveTime) -> Self {
        Self::new(from, to, Pricing::FreeBlock)
    }

    /// Attaches a diagnostic label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Window as billing minutes `[start, end)`.
    pub fn window_minutes(&self) -> (u32, u32) {
        (start_minute(self.from), end_minute(self.to))
    }

    /// Name if set, otherwise the kind and window, e.g. `per_hour 07:00-19:00`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{} {}-{}",
                self.pricing.kind(),
                self.from.format("%H:%M"),
                self.to.format("%H:%M")
            ),
        }
    }
}

impl Pricing {
    /// Tag used in tariff files.
    pub fn kind(&self) -> &'static str {
        match self {
            Pricing::Flat { .. } => "flat",
            Pricing::PerHour { .. } => "per_hour",
            Pricing::Capped { .. } => "capped",
            Pricing::FreeBlock => "free_block",
        }
    }
}

impl FeeRule for TariffRule {
    fn fit_test(&self, day_start: NaiveTime, day_end: NaiveTime) -> FitResult {
        let (window_start, window_end) = self.window_minutes();
        FitResult::overlap(
            start_minute(day_start),
            end_minute(day_end),
            window_start,
            window_end,
        )
    }

    fn cost(&self, fit: &FitResult) -> Charge {
        if !fit.matched {
            return Charge::zero();
        }
        match self.pricing {
            Pricing::Flat { amount_cents } => Charge::from(amount_cents),
            Pricing::PerHour {
                rate_cents,
                prorate: true,
            } => rate_cents.prorate(i64::from(fit.minutes), 60),
            Pricing::PerHour {
                rate_cents,
                prorate: false,
            } => Charge::from(rate_cents.times(fit.started_hours())),
            Pricing::Capped {
                rate_cents,
                cap_cents,
            } => Charge::from(rate_cents.times(fit.started_hours()).min(cap_cents)),
            Pricing::FreeBlock => Charge::zero(),
        }
    }
}

/// `HH:MM` (or `HH:MM:SS`) time-of-day strings in tariff files.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
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
    fn test_overlap() {
        let fit = FitResult::overlap(8 * 60, 10 * 60, 9 * 60, 17 * 60);
        assert!(fit.matched);
        assert_eq!((fit.start_minute, fit.end_minute, fit.minutes), (540, 600, 60));

        assert!(!FitResult::overlap(8 * 60, 9 * 60, 9 * 60, 17 * 60).matched);
        assert!(!FitResult::overlap(600, 600, 0, 1440).matched);
    }

    #[test]
    fn test_end_of_day_window_covers_last_minute() {
        let rule = TariffRule::per_hour(time(18, 0), time(23, 59), Money::from_cents(100));
        let fit = rule.fit_test(time(22, 0), time(23, 59));
        assert_eq!(fit.minutes, 120);
        assert_eq!(rule.cost(&fit), Charge::from(Money::from_cents(200)));
    }

    #[test]
    fn test_per_hour_rounds_up_started_hours() {
        let rule = TariffRule::per_hour(time(0, 0), time(23, 59), Money::from_cents(250));
        let fit = rule.fit_test(time(8, 0), time(9, 1));
        assert_eq!(fit.minutes, 61);
        assert_eq!(rule.cost(&fit).round_to_cents(), Money::from_cents(500));
    }

    #[test]
    fn test_prorated_bills_by_minute() {
        let rule = TariffRule::prorated(time(0, 0), time(23, 59), Money::from_cents(100));
        let fit = rule.fit_test(time(8, 0), time(8, 7));
        assert_eq!(rule.cost(&fit).steps(), 1_167);
    }

    #[test]
    fn test_capped() {
        let rule = TariffRule::capped(
            time(0, 0),
            time(23, 59),
            Money::from_cents(300),
            Money::from_cents(1500),
        );
        let short = rule.fit_test(time(8, 0), time(10, 0));
        assert_eq!(rule.cost(&short).round_to_cents(), Money::from_cents(600));

        let long = rule.fit_test(time(0, 0), time(23, 59));
        assert_eq!(rule.cost(&long).round_to_cents(), Money::from_cents(1500));
    }

    #[test]
    fn test_flat_and_free_block() {
        let night = TariffRule::flat(time(18, 0), time(23, 59), Money::from_cents(800));
        assert!(!night.fit_test(time(8, 0), time(17, 0)).matched);
        let fit = night.fit_test(time(17, 30), time(18, 30));
        assert_eq!(night.cost(&fit), Charge::from(Money::from_cents(800)));

        let free = TariffRule::free_block(time(0, 0), time(23, 59));
        let fit = free.fit_test(time(8, 0), time(9, 0));
        assert!(fit.matched);
        assert!(free.cost(&fit).is_zero());
    }

    #[test]
    fn test_cost_of_unmatched_fit_is_zero() {
        let rule = TariffRule::flat(time(0, 0), time(23, 59), Money::from_cents(500));
        assert!(rule.cost(&FitResult::no_match()).is_zero());
    }

    #[test]
    fn test_label() {
        let rule = TariffRule::per_hour(time(7, 0), time(19, 0), Money::from_cents(250));
        assert_eq!(rule.label(), "per_hour 07:00-19:00");
        assert_eq!(rule.named("daytime").label(), "daytime");
    }

    #[test]
    fn test_deserialize_from_json() {
        let rule: TariffRule = serde_json::from_str(
            r#"{"name":"evening","kind":"capped","from":"18:00","to":"23:59","rate_cents":200,"cap_cents":900}"#,
        )
        .unwrap();
        assert_eq!(rule.from, time(18, 0));
        assert_eq!(
            rule.pricing,
            Pricing::Capped {
                rate_cents: Money::from_cents(200),
                cap_cents: Money::from_cents(900),
            }
        );

        let whole_day: TariffRule =
            serde_json::from_str(r#"{"kind":"per_hour","rate_cents":100}"#).unwrap();
        assert_eq!(whole_day.window_minutes(), (0, 1440));
        assert_eq!(
            whole_day.pricing,
            Pricing::PerHour {
                rate_cents: Money::from_cents(100),
                prorate: false,
            }
        );

        let bad_time = r#"{"kind":"per_hour","from":"7am","rate_cents":1}"#;
        assert!(serde_json::from_str::<TariffRule>(bad_time).is_err());
    }
}
