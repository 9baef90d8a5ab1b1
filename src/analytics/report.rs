// Analytics report types
// Provides the report shape returned to API callers and its string formats

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// Marker rendered for metrics with no data behind them
pub const NOT_APPLICABLE: &str = "N/A";

/// Elapsed-time metric that may have no data behind it
///
/// Serialized as a duration string (`"2:30:00"`) or `"N/A"`, so callers can
/// tell "no completed orders" apart from a zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentTime {
    NotApplicable,
    Elapsed(Duration),
}

impl FulfillmentTime {
    pub fn from_option(elapsed: Option<Duration>) -> Self {
        match elapsed {
            Some(elapsed) => FulfillmentTime::Elapsed(elapsed),
            None => FulfillmentTime::NotApplicable,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, FulfillmentTime::Elapsed(_))
    }
}

impl fmt::Display for FulfillmentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentTime::NotApplicable => f.write_str(NOT_APPLICABLE),
            FulfillmentTime::Elapsed(elapsed) => f.write_str(&format_elapsed(*elapsed)),
        }
    }
}

impl Serialize for FulfillmentTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whole-number percentage of completed orders, truncated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionRate(pub usize);

impl CompletionRate {
    /// `completed * 100 / total` with integer (truncating) division
    pub fn from_counts(completed: usize, total: usize) -> Self {
        if total == 0 {
            CompletionRate(0)
        } else {
            CompletionRate(completed * 100 / total)
        }
    }
}

impl fmt::Display for CompletionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for CompletionRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Summary statistics over a batch of orders
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 425.5)]
    pub average_order_value: Decimal,
    #[schema(value_type = String, example = "2:30:00")]
    pub average_fulfillment_time: FulfillmentTime,
    #[schema(example = 3)]
    pub total_orders: usize,
    pub orders_by_segment: HashMap<String, usize>,
    #[schema(value_type = String, example = "66%")]
    pub completion_rate: CompletionRate,
    #[schema(value_type = String, example = "1:3:00:00")]
    pub longest_fulfillment_time: FulfillmentTime,
    #[schema(value_type = String, example = "0:45:00")]
    pub shortest_fulfillment_time: FulfillmentTime,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1700.0)]
    pub revenue_this_month: Decimal,
}

impl AnalyticsReport {
    /// Report for an empty order batch
    pub fn empty() -> Self {
        Self {
            average_order_value: Decimal::ZERO,
            average_fulfillment_time: FulfillmentTime::NotApplicable,
            total_orders: 0,
            orders_by_segment: HashMap::new(),
            completion_rate: CompletionRate::default(),
            longest_fulfillment_time: FulfillmentTime::NotApplicable,
            shortest_fulfillment_time: FulfillmentTime::NotApplicable,
            revenue_this_month: Decimal::ZERO,
        }
    }
}

/// Format an elapsed time as `[-][d:]h:mm:ss[.fffffff]`
///
/// Days appear only when non-zero. Fractional seconds are kept to 100ns with
/// trailing zeros trimmed, and dropped entirely when zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let negative = elapsed < Duration::zero();
    let elapsed = if negative { -elapsed } else { elapsed };

    let total_seconds = elapsed.num_seconds();
    let sub_second = elapsed - Duration::seconds(total_seconds);
    let ticks = sub_second.num_nanoseconds().unwrap_or(0) / 100;

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}:", days));
    }
    out.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        let fraction = format!("{:07}", ticks);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}
