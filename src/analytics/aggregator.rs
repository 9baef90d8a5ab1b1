// Order Analytics Aggregator
//
// Folds a batch of orders into an AnalyticsReport. Pure and read-only: the
// evaluation instant is passed in by the caller.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::analytics::report::{AnalyticsReport, CompletionRate, FulfillmentTime};
use crate::customers::CustomerSegment;
use crate::orders::Order;

/// Grouping key for orders whose customer cannot be resolved
pub const UNKNOWN_SEGMENT: &str = "Unknown";

/// Aggregator for order summary statistics
pub struct OrderAnalytics;

impl OrderAnalytics {
    /// Summarize `orders` as of `now`
    ///
    /// # Arguments
    /// * `orders` - Every order to include, any status
    /// * `segments` - Customer id to segment lookup; orders whose customer is
    ///   missing from it are grouped under "Unknown"
    /// * `now` - Evaluation instant for fulfillment times and the current month
    pub fn summarize(
        orders: &[Order],
        segments: &HashMap<i32, CustomerSegment>,
        now: DateTime<Utc>,
    ) -> AnalyticsReport {
        if orders.is_empty() {
            return AnalyticsReport::empty();
        }

        let total_orders = orders.len();
        let amounts: Vec<Decimal> = orders.iter().map(|order| order.total_amount).collect();
        let average_order_value = mean_amount(&amounts);

        // Fulfillment is measured from creation to `now`, not to delivered_at
        let fulfillment_times: Vec<Duration> = orders
            .iter()
            .filter(|order| order.status.is_completed())
            .map(|order| now - order.created_at)
            .collect();

        let completion_rate = CompletionRate::from_counts(fulfillment_times.len(), total_orders);

        let average_fulfillment_time = FulfillmentTime::from_option(average_duration(&fulfillment_times));
        let longest_fulfillment_time = FulfillmentTime::from_option(fulfillment_times.iter().copied().max());
        let shortest_fulfillment_time = FulfillmentTime::from_option(fulfillment_times.iter().copied().min());

        let orders_by_segment = Self::count_by_segment(orders, segments);

        let month_start = start_of_month(now);
        let revenue_this_month = checked_total(
            orders
                .iter()
                .filter(|order| order.created_at >= month_start)
                .map(|order| order.total_amount),
        )
        .unwrap_or_else(|| {
            tracing::warn!("Revenue for the current month exceeds the decimal range, capping");
            Decimal::MAX
        });

        tracing::debug!(
            "Summarized {} orders ({} completed, {} segments)",
            total_orders,
            fulfillment_times.len(),
            orders_by_segment.len()
        );

        AnalyticsReport {
            average_order_value,
            average_fulfillment_time,
            total_orders,
            orders_by_segment,
            completion_rate,
            longest_fulfillment_time,
            shortest_fulfillment_time,
            revenue_this_month,
        }
    }

    /// Count orders per owning customer's segment label
    fn count_by_segment(
        orders: &[Order],
        segments: &HashMap<i32, CustomerSegment>,
    ) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for order in orders {
            let label = match segments.get(&order.customer_id) {
                Some(segment) => segment.label(),
                None => {
                    tracing::warn!(
                        "Order {} references unknown customer {}",
                        order.id,
                        order.customer_id
                    );
                    UNKNOWN_SEGMENT
                }
            };
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Sum of amounts, `None` once it leaves the decimal range
fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Mean of a non-empty set of amounts
///
/// Falls back to summing per-order shares when the plain total would overflow.
fn mean_amount(amounts: &[Decimal]) -> Decimal {
    let count = Decimal::from(amounts.len());

    match checked_total(amounts.iter().copied()) {
        Some(total) => total / count,
        None => {
            tracing::warn!("Order totals exceed the decimal range, averaging per order");
            amounts.iter().fold(Decimal::ZERO, |mean, amount| {
                mean.checked_add(*amount / count).unwrap_or(Decimal::MAX)
            })
        }
    }
}

/// Mean of a set of durations, `None` when empty
fn average_duration(durations: &[Duration]) -> Option<Duration> {
    if durations.is_empty() {
        return None;
    }

    let total_nanos: i128 = durations
        .iter()
        .map(|elapsed| {
            elapsed
                .num_nanoseconds()
                .map(i128::from)
                .unwrap_or_else(|| i128::from(elapsed.num_milliseconds()) * 1_000_000)
        })
        .sum();
    let mean_nanos = total_nanos / durations.len() as i128;

    let mean_millis = mean_nanos / 1_000_000;
    let remainder_nanos = mean_nanos % 1_000_000;
    Some(Duration::milliseconds(mean_millis as i64) + Duration::nanoseconds(remainder_nanos as i64))
}

/// First instant of the calendar month containing `now`, in UTC
fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|first| first.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(now)
}
