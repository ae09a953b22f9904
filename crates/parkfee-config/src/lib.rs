//! # parkfee-config: Tariff Configuration for ParkFee
//!
//! Loads the carparks, holiday list and calculator settings that
//! `parkfee-core` takes as read-only input.
//!
//! ## Load Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   defaults ──► parkfee.toml ──► PARKFEE_* env ──► validate ──► config   │
//! │                                                                         │
//! │   config.carpark("harbour")   ──► &CarPark                              │
//! │   config.holiday_calendar()   ──► FixedHolidays                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;

pub use config::{CalculatorSettings, ParkFeeConfig};
pub use error::{ConfigError, ConfigResult};
