//! # Money Module
//!
//! Provides the `Money` type for reported fees and the `Charge` type used
//! while a fee is still being accumulated.
//!
//! ## Why Two Types?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CENTS ARE NOT ENOUGH WHILE ACCUMULATING                                │
//! │                                                                         │
//! │  A prorated rule of $1.00/hour for 7 minutes costs $0.11666...          │
//! │  Rounding every rule to cents, then summing, drifts:                    │
//! │    3 × round(0.11666) = 0.36,  round(3 × 0.11666) = 0.35                │
//! │                                                                         │
//! │  OUR SOLUTION:                                                          │
//! │    Charge  = integer 1/100 cents, summed across segments and rules      │
//! │    Money   = integer cents, produced ONCE by Charge::round_to_cents     │
//! │                                                                         │
//! │  No floating point anywhere in the money path.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use parkfee_core::money::{Charge, Money};
//!
//! let rate = Money::from_cents(250); // $2.50 per hour
//! let mut total = Charge::zero();
//! total += Charge::from(rate.times(2));
//! total += rate.prorate(7, 60);
//!
//! assert_eq!(total.round_to_cents(), Money::from_cents(529));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Sub-cent steps per cent held by a [`Charge`].
pub const CHARGE_STEPS_PER_CENT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a custom rule could yield a negative contribution and
///   the accumulator reports the raw sum, so the type must hold it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **serde transparent**: tariff files and JSON quotes carry plain cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use parkfee_core::money::Money;
    ///
    /// let fee = Money::from_cents(1235); // Represents $12.35
    /// assert_eq!(fee.cents(), 1235);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a whole count (hours, blocks, visits).
    ///
    /// Saturates at the `i64` bounds instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use parkfee_core::money::Money;
    ///
    /// let hourly = Money::from_cents(299);
    /// assert_eq!(hourly.times(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn times(&self, count: i64) -> Self {
        Money(self.0.saturating_mul(count))
    }

    /// Prorates this amount over `part` of `whole` at sub-cent precision.
    ///
    /// The result is rounded half away from zero at the 1/100 cent step,
    /// which is far below anything that survives the final rounding.
    ///
    /// ## Example
    /// ```rust
    /// use parkfee_core::money::Money;
    ///
    /// // $1.00 per hour, 7 minutes parked = $0.11666... -> 0.1167
    /// let charge = Money::from_cents(100).prorate(7, 60);
    /// assert_eq!(charge.steps(), 1167);
    /// ```
    pub fn prorate(&self, part: i64, whole: i64) -> Charge {
        if whole == 0 {
            return Charge::zero();
        }
        // i128 keeps cents * steps * minutes clear of overflow
        let numerator = self.0 as i128 * CHARGE_STEPS_PER_CENT as i128 * part as i128;
        Charge(clamp_to_i64(div_round_half_away(numerator, whole as i128)))
    }

    /// Formats as a plain decimal string without currency sign, e.g. `12.35`.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Display shows money with a dollar sign, e.g. `$12.35` or `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Charge Type
// =============================================================================

/// A running fee total in 1/100 cent steps.
///
/// Every rule cost is a `Charge`; the accumulator sums charges across all
/// segments and rules and rounds exactly once at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Charge(i64);

impl Charge {
    /// Creates a charge from raw 1/100 cent steps.
    ///
    /// ## Example
    /// ```rust
    /// use parkfee_core::money::{Charge, Money};
    ///
    /// // 12.345 currency units
    /// let charge = Charge::from_steps(123_450);
    /// assert_eq!(charge.round_to_cents(), Money::from_cents(1235));
    /// ```
    #[inline]
    pub const fn from_steps(steps: i64) -> Self {
        Charge(steps)
    }

    /// Raw 1/100 cent steps.
    #[inline]
    pub const fn steps(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Charge(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Rounds to whole cents, half away from zero (12.345 -> 12.35).
    pub fn round_to_cents(&self) -> Money {
        Money::from_cents(clamp_to_i64(div_round_half_away(
            self.0 as i128,
            CHARGE_STEPS_PER_CENT as i128,
        )))
    }
}

impl From<Money> for Charge {
    fn from(money: Money) -> Self {
        Charge(money.cents().saturating_mul(CHARGE_STEPS_PER_CENT))
    }
}

impl Add for Charge {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Charge(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Charge {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Charge {
    fn sum<I: Iterator<Item = Charge>>(iter: I) -> Self {
        iter.fold(Charge::zero(), Add::add)
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = (CHARGE_STEPS_PER_CENT * 100) as u64;
        write!(f, "{}${}.{:04}", sign, abs / per_unit, abs % per_unit)
    }
}

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        -((-numerator + half) / denominator)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
