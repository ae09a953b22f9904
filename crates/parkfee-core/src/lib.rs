//! # parkfee-core: Pure Fee Calculation for ParkFee
//!
//! This crate computes the parking fee owed for a stay between an entry and
//! an exit timestamp, given a carpark's tariff. It has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ParkFee Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    parkfee-cli                                  │   │
//! │  │        quote ──► segments ──► carparks                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    parkfee-config                               │   │
//! │  │        parkfee.toml + env ──► CarPark, FixedHolidays            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ parkfee-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  segment  │  │   grace   │  │calculator │  │   rules   │  │   │
//! │  │   │ DaySegment│  │ free stay │  │ FeeQuote  │  │ FeeRule   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stay, DaySegment, VehicleCategory, timestamp parsing
//! - [`money`] - Money (cents) and Charge (sub-cent accumulator)
//! - [`calendar`] - Weekend detection and the holiday calendar seam
//! - [`segment`] - Day Segmenter
//! - [`grace`] - Grace Period Gate
//! - [`rules`] - FeeRule capability and configured rule kinds
//! - [`tariff`] - CarPark tariff configuration
//! - [`calculator`] - Fee Accumulator
//! - [`observer`] - Optional calculation event hooks
//! - [`validation`] - Tariff validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same stay + same tariff = same fee, always
//! 2. **No I/O**: configuration is loaded elsewhere and passed in read-only
//! 3. **Integer Money**: cents for results, 1/100 cents while accumulating
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveTime;
//! use parkfee_core::{calculate_fee, CarPark, Money, TariffRule, VehicleCategory};
//!
//! let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let carpark = CarPark::new("harbour", 10)
//!     .with_weekday_rules(vec![TariffRule::per_hour(hm(0, 0), hm(23, 59), Money::from_cents(250))])
//!     .with_weekend_rules(vec![TariffRule::flat(hm(0, 0), hm(23, 59), Money::from_cents(500))]);
//!
//! // Wed 08:00 → Wed 10:00: 2 hours at $2.50
//! let fee = calculate_fee("2024-01-10T08:00", "2024-01-10T10:00", &carpark, VehicleCategory::Car).unwrap();
//! assert_eq!(fee.to_string(), "$5.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod calendar;
pub mod error;
pub mod grace;
pub mod money;
pub mod observer;
pub mod rules;
pub mod segment;
pub mod tariff;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate_fee, FeeCalculator, FeeQuote, SegmentCharge};
pub use calendar::{FixedHolidays, HolidayCalendar, NoHolidays};
pub use error::{CoreError, CoreResult, ValidationError};
pub use grace::is_within_grace_period;
pub use money::{Charge, Money};
pub use observer::{FeeObserver, NoopObserver, TracingObserver};
pub use rules::{FeeRule, FitResult, Pricing, TariffRule};
pub use segment::segment_stay;
pub use tariff::{CarPark, DayTypeRules, UnifiedRules};
pub use types::{DaySegment, DayType, Stay, VehicleCategory};
