//! Subcommand handlers. Each returns the text to print so it can be tested
//! without capturing stdout.

use std::fmt::Write;

use anyhow::{Context, Result};
use parkfee_config::config::parse_date_list;
use parkfee_config::ParkFeeConfig;
use parkfee_core::segment::segment_with;
use parkfee_core::{
    FeeCalculator, FeeObserver, FeeQuote, NoopObserver, Stay, TracingObserver, VehicleCategory,
};
use serde::Serialize;
use tracing::{debug, info};

/// JSON shape of `quote --json`: the quote plus the fee as a decimal string.
#[derive(Serialize)]
struct QuoteOutput<'a> {
    #[serde(flatten)]
    quote: &'a FeeQuote,
    fee: String,
}

pub(crate) fn quote(
    config: &ParkFeeConfig,
    entry: &str,
    exit: &str,
    carpark_id: &str,
    vehicle: Option<VehicleCategory>,
    json: bool,
) -> Result<String> {
    let carpark = config.carpark(carpark_id)?;
    let category = vehicle.unwrap_or(config.calculator.default_vehicle);
    let stay = Stay::parse(entry, exit)?;

    let calendar = config.holiday_calendar();
    let observer: &dyn FeeObserver = if config.calculator.trace_rules {
        &TracingObserver
    } else {
        &NoopObserver
    };

    let quote = FeeCalculator::new()
        .with_calendar(&calendar)
        .with_observer(observer)
        .calculate(&stay, carpark, category)
        .with_context(|| format!("Failed to quote {} at '{}'", stay, carpark.id))?;

    info!(
        carpark = %carpark.id,
        category = %category,
        total = %quote.total,
        "Quote calculated"
    );

    if json {
        let output = QuoteOutput {
            quote: &quote,
            fee: quote.total.to_decimal_string(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let mut out = String::new();
    let title = if carpark.name.is_empty() {
        carpark.id.clone()
    } else {
        format!("{} ({})", carpark.id, carpark.name)
    };
    writeln!(out, "Carpark  {}", title)?;
    writeln!(out, "Vehicle  {}", category)?;
    writeln!(out, "Stay     {}", stay)?;

    if quote.within_grace {
        writeln!(
            out,
            "Within the {} minute grace period, no charge",
            carpark.grace_period_in_minutes
        )?;
    }
    for item in &quote.segments {
        writeln!(
            out,
            "  {:<40} {:>2} rule(s)  {}",
            item.segment.to_string(),
            item.matched_rules,
            item.charge
        )?;
    }
    write!(out, "Total    {}", quote.total)?;

    Ok(out)
}

pub(crate) fn segments(
    config: &ParkFeeConfig,
    entry: &str,
    exit: &str,
    extra_holidays: Option<&str>,
) -> Result<String> {
    let stay = Stay::parse(entry, exit)?;

    let mut calendar = config.holiday_calendar();
    if let Some(list) = extra_holidays {
        for date in parse_date_list("--holidays", list)? {
            calendar.insert(date);
        }
    }
    debug!(special_days = calendar.len(), "Segmenting stay");

    let mut out = String::new();
    for (index, segment) in segment_with(&stay, &calendar).iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {}  {} min",
            index,
            segment,
            segment.billable_minutes()
        )?;
    }
    Ok(out.trim_end().to_string())
}

pub(crate) fn carparks(config: &ParkFeeConfig) -> Result<String> {
    if config.carparks.is_empty() {
        return Ok("No carparks configured".to_string());
    }

    let mut out = String::new();
    for carpark in &config.carparks {
        let lists: Vec<String> = carpark
            .rule_lists()
            .into_iter()
            .map(|(path, rules)| format!("{}={}", path, rules.len()))
            .collect();
        writeln!(
            out,
            "{:<16} grace {:>4} min  {}  {}",
            carpark.id,
            carpark.grace_period_in_minutes,
            carpark.name,
            lists.join(" ")
        )?;
    }
    Ok(out.trim_end().to_string())
}
