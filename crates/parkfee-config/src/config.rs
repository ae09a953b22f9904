//! # Tariff Configuration
//!
//! Loads carparks, public holidays and calculator settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PARKFEE_TRACE_RULES=true                                           │
//! │     PARKFEE_EXTRA_HOLIDAYS=2024-12-25,2024-12-26                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else PARKFEE_CONFIG, else                         │
//! │     ~/.config/parkfee/parkfee.toml (Linux)                             │
//! │     ~/Library/Application Support/com.parkfee.parkfee/ (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no carparks, no holidays, rule tracing off                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! holidays = ["2024-12-25", "2024-12-26"]
//!
//! [calculator]
//! trace_rules = false
//! default_vehicle = "car"
//!
//! [[carparks]]
//! id = "harbour"
//! name = "Harbour Street"
//! grace_period_in_minutes = 15
//!
//! [[carparks.car_fee.weekday_fee_rules]]
//! kind = "per_hour"
//! from = "07:00"
//! to = "19:00"
//! rate_cents = 250
//!
//! [[carparks.motorcycle_fee.fee_rules]]
//! kind = "flat"
//! amount_cents = 300
//! ```

use chrono::NaiveDate;
use parkfee_core::validation::validate_carparks;
use parkfee_core::{CarPark, FixedHolidays, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "PARKFEE_CONFIG";
/// Environment override for [`CalculatorSettings::trace_rules`].
pub const ENV_TRACE_RULES: &str = "PARKFEE_TRACE_RULES";
/// Comma-separated dates appended to the holiday list.
pub const ENV_EXTRA_HOLIDAYS: &str = "PARKFEE_EXTRA_HOLIDAYS";

const CONFIG_FILE_NAME: &str = "parkfee.toml";

// =============================================================================
// Calculator Settings
// =============================================================================

/// How fees are calculated, independent of any single carpark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Emit a debug event for every segment and matched rule.
    #[serde(default)]
    pub trace_rules: bool,

    /// Category used when a caller does not name one.
    #[serde(default)]
    pub default_vehicle: VehicleCategory,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete tariff configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkFeeConfig {
    /// Dates billed with weekend/special rules, in `YYYY-MM-DD` strings.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,

    #[serde(default)]
    pub calculator: CalculatorSettings,

    #[serde(default)]
    pub carparks: Vec<CarPark>,
}

impl ParkFeeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `PARKFEE_CONFIG`, else the
    ///    platform default. Only the platform default may be absent.
    /// 3. Environment variables
    ///
    /// Every carpark is validated before the config is returned.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::load_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => {
                    debug!("No platform config directory, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file. Does not apply overrides or validate.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        info!(?path, "Loading tariff config from file");
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            carparks = config.carparks.len(),
            holidays = config.holidays.len(),
            "Tariff config parsed"
        );
        Ok(config)
    }

    /// Parses TOML text.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Tariff config saved");
        Ok(path)
    }

    /// Validates every carpark and the uniqueness of their ids.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_carparks(&self.carparks)?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(value) = lookup(ENV_TRACE_RULES) {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.calculator.trace_rules = true,
                "0" | "false" | "no" | "off" => self.calculator.trace_rules = false,
                _ => warn!(value = %value, "Unknown {} value, ignoring", ENV_TRACE_RULES),
            }
        }

        if let Some(value) = lookup(ENV_EXTRA_HOLIDAYS) {
            let extra = parse_date_list(ENV_EXTRA_HOLIDAYS, &value)?;
            debug!(count = extra.len(), "Adding holidays from environment");
            self.holidays.extend(extra);
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "parkfee", "parkfee")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Looks up a carpark by id.
    pub fn carpark(&self, id: &str) -> ConfigResult<&CarPark> {
        self.carparks
            .iter()
            .find(|carpark| carpark.id == id)
            .ok_or_else(|| ConfigError::CarparkNotFound(id.to_string()))
    }

    /// The holiday list as a calendar for the fee calculator.
    pub fn holiday_calendar(&self) -> FixedHolidays {
        FixedHolidays::new(self.holidays.iter().copied())
    }
}

/// Parses `YYYY-MM-DD` dates separated by commas; blanks are skipped.
pub fn parse_date_list(key: &str, value: &str) -> ConfigResult<Vec<NaiveDate>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            NaiveDate::parse_from_str(part, "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("'{}' is not a YYYY-MM-DD date: {}", part, e),
            })
        })
        .collect()
}
