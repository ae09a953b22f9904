//! # Error Types
//!
//! Domain-specific error types for parkfee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  parkfee-core errors (this file)                                       │
//! │  ├── CoreError        - Calculation failures                           │
//! │  └── ValidationError  - Tariff configuration failures                  │
//! │                                                                         │
//! │  parkfee-config errors (separate crate)                                │
//! │  └── ConfigError      - File / TOML / environment failures             │
//! │                                                                         │
//! │  CLI (anyhow at the edge)                                              │
//! │                                                                         │
//! │  Flow: ValidationError → ConfigError → anyhow → stderr                 │
//! │        CoreError → anyhow → stderr                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, input, carpark id)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retried: the core has no transient failure modes

use thiserror::Error;

use crate::types::{DayType, VehicleCategory};

// =============================================================================
// Core Error
// =============================================================================

/// Fee calculation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A timestamp could not be parsed, or the stay runs backwards.
    ///
    /// ## When This Occurs
    /// - `entry`/`exit` is not an ISO-8601 local date-time
    /// - `exit` is before `entry`
    #[error("Invalid {field} timestamp '{input}': {reason}")]
    InvalidTimestamp {
        field: String,
        input: String,
        reason: String,
    },

    /// The segmenter produced a segment whose start is after its end.
    ///
    /// This is a defect signal, never a bad-input signal. The stay
    /// boundaries are carried so the failure can be reproduced.
    #[error(
        "Segment {index} of stay {entry} -> {exit} starts at {start} after it ends at {end}"
    )]
    SegmentationInvariantViolation {
        entry: String,
        exit: String,
        index: usize,
        start: String,
        end: String,
    },

    /// The carpark has no rule list for a category/day-type combination
    /// that a segment of the stay needs.
    #[error("Carpark '{carpark}' has no {day_type} rule list for {category}")]
    MissingRuleList {
        carpark: String,
        category: VehicleCategory,
        day_type: DayType,
    },
}

impl CoreError {
    pub(crate) fn invalid_timestamp(
        field: &str,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::InvalidTimestamp {
            field: field.to_string(),
            input: input.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Tariff configuration validation errors.
///
/// Raised before any calculation runs, when a carpark is loaded.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A rule window does not describe a forward time range.
    #[error("{field} window {from}-{to} is empty or reversed")]
    EmptyWindow {
        field: String,
        from: String,
        to: String,
    },

    /// Invalid format (e.g., unknown vehicle category, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two carparks with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MissingRuleList {
            carpark: "cp-01".to_string(),
            category: VehicleCategory::Car,
            day_type: DayType::WeekendOrSpecial,
        };
        assert_eq!(
            err.to_string(),
            "Carpark 'cp-01' has no weekend/special rule list for car"
        );

        let err = CoreError::invalid_timestamp("exit", "yesterday", "not a local date-time");
        assert_eq!(
            err.to_string(),
            "Invalid exit timestamp 'yesterday': not a local date-time"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "carpark.id".to_string(),
        };
        assert_eq!(err.to_string(), "carpark.id is required");

        let err = ValidationError::EmptyWindow {
            field: "weekday_fee_rules[0]".to_string(),
            from: "18:00".to_string(),
            to: "08:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "weekday_fee_rules[0] window 18:00-08:00 is empty or reversed"
        );
    }
}
