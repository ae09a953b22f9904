//! # Tariff Configuration
//!
//! A carpark's grace period and fee rule lists, keyed by vehicle category
//! and day type. Supplied by the caller and only ever read here.
//!
//! ## Rule List Selection
//! ```text
//! ┌──────────────┬───────────────────────────┬───────────────────────────┐
//! │ category     │ weekday segment           │ weekend/special segment   │
//! ├──────────────┼───────────────────────────┼───────────────────────────┤
//! │ car          │ car_fee.weekday_fee_rules │ car_fee.weekend_ph_fee_   │
//! │              │                           │   rules                   │
//! │ motorcycle   │ motorcycle_fee.fee_rules  │ motorcycle_fee.fee_rules  │
//! └──────────────┴───────────────────────────┴───────────────────────────┘
//! ```
//! A missing list is only an error once a segment actually needs it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::rules::TariffRule;
use crate::types::{DayType, VehicleCategory};

/// Rules for the primary category, split by day type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_fee_rules: Option<Vec<TariffRule>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_ph_fee_rules: Option<Vec<TariffRule>>,
}

/// One rule list used for every day type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedRules {
    #[serde(default)]
    pub fee_rules: Vec<TariffRule>,
}

/// A parking facility's tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarPark {
    /// Identifier used to look the carpark up.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Stays of at most this many whole minutes are free.
    #[serde(default)]
    pub grace_period_in_minutes: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_fee: Option<DayTypeRules>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "motocycle_fee")]
    pub motorcycle_fee: Option<UnifiedRules>,
}

impl CarPark {
    /// A carpark with no rule lists yet.
    pub fn new(id: impl Into<String>, grace_period_in_minutes: u32) -> Self {
        CarPark {
            id: id.into(),
            name: String::new(),
            grace_period_in_minutes,
            car_fee: None,
            motorcycle_fee: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_weekday_rules(mut self, rules: Vec<TariffRule>) -> Self {
        self.car_fee.get_or_insert_with(DayTypeRules::default).weekday_fee_rules = Some(rules);
        self
    }

    pub fn with_weekend_rules(mut self, rules: Vec<TariffRule>) -> Self {
        self.car_fee.get_or_insert_with(DayTypeRules::default).weekend_ph_fee_rules = Some(rules);
        self
    }

    pub fn with_motorcycle_rules(mut self, rules: Vec<TariffRule>) -> Self {
        self.motorcycle_fee = Some(UnifiedRules { fee_rules: rules });
        self
    }

    /// Selects the rule list for `category` on a day of `day_type`.
    ///
    /// ## Errors
    /// [`CoreError::MissingRuleList`] when the carpark has no such list.
    pub fn rules_for(
        &self,
        category: VehicleCategory,
        day_type: DayType,
    ) -> CoreResult<&[TariffRule]> {
        let list = match category {
            VehicleCategory::Car => self.car_fee.as_ref().and_then(|fee| match day_type {
                DayType::Weekday => fee.weekday_fee_rules.as_deref(),
                DayType::WeekendOrSpecial => fee.weekend_ph_fee_rules.as_deref(),
            }),
            VehicleCategory::Motorcycle => self
                .motorcycle_fee
                .as_ref()
                .map(|fee| fee.fee_rules.as_slice()),
        };

        list.ok_or_else(|| CoreError::MissingRuleList {
            carpark: self.id.clone(),
            category,
            day_type,
        })
    }

    /// Every configured rule list with a short path for diagnostics.
    pub fn rule_lists(&self) -> Vec<(String, &[TariffRule])> {
        let mut lists = Vec::new();
        if let Some(fee) = &self.car_fee {
            if let Some(rules) = &fee.weekday_fee_rules {
                lists.push(("car_fee.weekday_fee_rules".to_string(), rules.as_slice()));
            }
            if let Some(rules) = &fee.weekend_ph_fee_rules {
                lists.push(("car_fee.weekend_ph_fee_rules".to_string(), rules.as_slice()));
            }
        }
        if let Some(fee) = &self.motorcycle_fee {
            lists.push(("motorcycle_fee.fee_rules".to_string(), fee.fee_rules.as_slice()));
        }
        lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::NaiveTime;

    fn any_rule() -> TariffRule {
        TariffRule::per_hour(
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
            Money::from_cents(100),
        )
    }

    #[test]
    fn test_rule_selection() {
        let carpark = CarPark::new("cp-01", 10)
            .with_weekday_rules(vec![any_rule()])
            .with_weekend_rules(vec![any_rule(), any_rule()])
            .with_motorcycle_rules(vec![]);

        assert_eq!(carpark.rules_for(VehicleCategory::Car, DayType::Weekday).unwrap().len(), 1);
        assert_eq!(
            carpark.rules_for(VehicleCategory::Car, DayType::WeekendOrSpecial).unwrap().len(),
            2
        );
        // Motorcycles share one list, and an empty list is still a list
        assert!(carpark
            .rules_for(VehicleCategory::Motorcycle, DayType::WeekendOrSpecial)
            .unwrap()
            .is_empty());
        assert_eq!(carpark.rule_lists().len(), 3);
    }

    #[test]
    fn test_missing_rule_lists() {
        let carpark = CarPark::new("cp-02", 0).with_weekday_rules(vec![any_rule()]);

        let err = carpark
            .rules_for(VehicleCategory::Car, DayType::WeekendOrSpecial)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingRuleList {
                category: VehicleCategory::Car,
                day_type: DayType::WeekendOrSpecial,
                ..
            }
        ));
        assert!(carpark.rules_for(VehicleCategory::Motorcycle, DayType::Weekday).is_err());
    }

    #[test]
    fn test_deserialize_carpark() {
        let carpark: CarPark = serde_json::from_str(
            r#"{
                "id": "cp-03",
                "name": "Harbour",
                "grace_period_in_minutes": 15,
                "car_fee": {
                    "weekday_fee_rules": [{"kind": "per_hour", "rate_cents": 250}]
                },
                "motocycle_fee": {"fee_rules": [{"kind": "flat", "amount_cents": 300}]}
            }"#,
        )
        .unwrap();

        assert_eq!(carpark.grace_period_in_minutes, 15);
        assert!(carpark.rules_for(VehicleCategory::Car, DayType::Weekday).is_ok());
        assert!(carpark.rules_for(VehicleCategory::Car, DayType::WeekendOrSpecial).is_err());
        assert_eq!(
            carpark.rules_for(VehicleCategory::Motorcycle, DayType::Weekday).unwrap().len(),
            1
        );
    }
}
