//! # Calculation Observer
//!
//! Optional hook the accumulator calls with segment and rule-match details.
//! Production callers pass [`NoopObserver`]; [`TracingObserver`] turns the
//! same events into `tracing` debug records.

use crate::money::{Charge, Money};
use crate::rules::FitResult;
use crate::types::{DaySegment, Stay};

/// Receives calculation events. Every hook defaults to doing nothing.
pub trait FeeObserver {
    /// The stay was short enough to be free; nothing else will be reported.
    fn on_grace_period(&self, _stay: &Stay, _grace_minutes: u32) {}

    /// A segment is about to be billed against `rule_count` rules.
    fn on_segment(&self, _index: usize, _segment: &DaySegment, _rule_count: usize) {}

    /// Rule `rule_index` of the segment's list matched and contributed `charge`.
    fn on_rule_match(
        &self,
        _segment: &DaySegment,
        _rule_index: usize,
        _rule_label: &str,
        _fit: &FitResult,
        _charge: Charge,
    ) {
    }

    /// Final rounded total.
    fn on_total(&self, _stay: &Stay, _raw: Charge, _total: Money) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FeeObserver for NoopObserver {}

/// Emits each event as a `tracing` debug record under `parkfee::calc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FeeObserver for TracingObserver {
    fn on_grace_period(&self, stay: &Stay, grace_minutes: u32) {
        tracing::debug!(
            target: "parkfee::calc",
            stay = %stay,
            grace_minutes,
            "Stay within grace period"
        );
    }

    fn on_segment(&self, index: usize, segment: &DaySegment, rule_count: usize) {
        tracing::debug!(
            target: "parkfee::calc",
            index,
            segment = %segment,
            day_type = %segment.day_type(),
            rule_count,
            "Billing segment"
        );
    }

    fn on_rule_match(
        &self,
        segment: &DaySegment,
        rule_index: usize,
        rule_label: &str,
        fit: &FitResult,
        charge: Charge,
    ) {
        tracing::debug!(
            target: "parkfee::calc",
            date = %segment.date(),
            rule_index,
            rule = rule_label,
            minutes = fit.minutes,
            charge = %charge,
            "Rule matched"
        );
    }

    fn on_total(&self, stay: &Stay, raw: Charge, total: Money) {
        tracing::debug!(
            target: "parkfee::calc",
            stay = %stay,
            raw = %raw,
            total = %total,
            "Fee calculated"
        );
    }
}

impl<O: FeeObserver + ?Sized> FeeObserver for &O {
    fn on_grace_period(&self, stay: &Stay, grace_minutes: u32) {
        (**self).on_grace_period(stay, grace_minutes);
    }

    fn on_segment(&self, index: usize, segment: &DaySegment, rule_count: usize) {
        (**self).on_segment(index, segment, rule_count);
    }

    fn on_rule_match(
        &self,
        segment: &DaySegment,
        rule_index: usize,
        rule_label: &str,
        fit: &FitResult,
        charge: Charge,
    ) {
        (**self).on_rule_match(segment, rule_index, rule_label, fit, charge);
    }

    fn on_total(&self, stay: &Stay, raw: Charge, total: Money) {
        (**self).on_total(stay, raw, total);
    }
}
