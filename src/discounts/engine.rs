// Discount Engine
//
// Facade over the selector and strategies. Missing inputs degrade to a zero
// discount instead of an error.

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::customers::Customer;
use crate::discounts::selector::StrategySelector;
use crate::orders::{CandidateOrder, Order};

/// Discount Engine
///
/// Stateless apart from the shared, read-only strategy table. Safe to call
/// from any number of requests at once.
#[derive(Debug, Clone)]
pub struct DiscountEngine {
    selector: Arc<StrategySelector>,
}

impl DiscountEngine {
    /// Create a new DiscountEngine over a shared selector
    pub fn new(selector: Arc<StrategySelector>) -> Self {
        Self { selector }
    }

    /// Discount for `new_order` placed by `customer`
    ///
    /// Returns zero when either the customer or the new order is absent.
    /// Otherwise the strategy bound to the customer's segment decides.
    pub fn get_discount(
        &self,
        customer: Option<&Customer>,
        history: &[Order],
        new_order: Option<&CandidateOrder>,
    ) -> Decimal {
        let (customer, new_order) = match (customer, new_order) {
            (Some(customer), Some(new_order)) => (customer, new_order),
            _ => {
                tracing::debug!("Missing customer or order, no discount applied");
                return Decimal::ZERO;
            }
        };

        let strategy = self.selector.select_strategy(customer.segment);
        let discount = strategy.calculate_discount(customer, history, new_order);

        tracing::debug!(
            "Customer {} ({}) strategy {}: discount {} on {}",
            customer.id,
            customer.segment,
            strategy,
            discount,
            new_order.total_amount
        );

        discount
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::new(Arc::new(StrategySelector::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customers::CustomerSegment;
    use crate::discounts::DiscountStrategy;
    use crate::orders::OrderStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn customer(id: i32, segment: CustomerSegment) -> Customer {
        Customer {
            id,
            name: "John Doe".to_string(),
            segment,
            orders: Vec::new(),
        }
    }

    fn completed(id: i32, amount: Decimal) -> Order {
        Order {
            id,
            created_at: Utc::now(),
            delivered_at: None,
            total_amount: amount,
            status: OrderStatus::Completed,
            customer_id: 1,
        }
    }

    fn candidate(amount: Decimal) -> CandidateOrder {
        CandidateOrder {
            customer_id: 1,
            total_amount: amount,
        }
    }

    #[test]
    fn test_vip_customer_gets_discount() {
        let engine = DiscountEngine::default();
        let customer = customer(1, CustomerSegment::Vip);
        let history = vec![completed(1, dec!(2000)), completed(2, dec!(3000))];

        let discount = engine.get_discount(Some(&customer), &history, Some(&candidate(dec!(1000))));

        assert_eq!(discount, dec!(150));
    }

    #[test]
    fn test_missing_customer_returns_zero() {
        let engine = DiscountEngine::default();

        let discount = engine.get_discount(None, &[], Some(&candidate(dec!(1000))));

        assert_eq!(discount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_order_returns_zero() {
        let engine = DiscountEngine::default();
        let customer = customer(1, CustomerSegment::Vip);

        let discount = engine.get_discount(Some(&customer), &[], None);

        assert_eq!(discount, Decimal::ZERO);
    }

    #[test]
    fn test_default_segment_returns_zero() {
        let engine = DiscountEngine::default();
        let customer = customer(2, CustomerSegment::Default);
        let history = vec![
            completed(1, dec!(9000)),
            completed(2, dec!(9000)),
            completed(3, dec!(9000)),
        ];

        let discount = engine.get_discount(Some(&customer), &history, Some(&candidate(dec!(1000))));

        assert_eq!(discount, Decimal::ZERO);
    }

    #[test]
    fn test_loyal_customer_with_three_completed_orders() {
        let engine = DiscountEngine::default();
        let customer = customer(2, CustomerSegment::Loyal);
        let history = vec![
            completed(1, dec!(500)),
            completed(2, dec!(500)),
            completed(3, dec!(500)),
        ];

        let discount = engine.get_discount(Some(&customer), &history, Some(&candidate(dec!(1000))));

        assert_eq!(discount, dec!(50));
    }

    #[test]
    fn test_premium_customer_rates() {
        let engine = DiscountEngine::default();
        let customer = customer(3, CustomerSegment::Premium);

        let modest = vec![completed(1, dec!(10000))];
        let big = vec![completed(1, dec!(10000)), completed(2, dec!(0.01))];

        assert_eq!(
            engine.get_discount(Some(&customer), &modest, Some(&candidate(dec!(500)))),
            dec!(50)
        );
        assert_eq!(
            engine.get_discount(Some(&customer), &big, Some(&candidate(dec!(500)))),
            dec!(100)
        );
    }

    #[test]
    fn test_premium_history_past_decimal_range() {
        let engine = DiscountEngine::default();
        let customer = customer(3, CustomerSegment::Premium);
        let history = vec![completed(1, Decimal::MAX), completed(2, Decimal::MAX)];

        let discount = engine.get_discount(Some(&customer), &history, Some(&candidate(dec!(500))));

        assert_eq!(discount, dec!(100));
    }

    #[test]
    fn test_unmapped_segment_gets_no_discount() {
        let selector = StrategySelector::from_table([(CustomerSegment::Loyal, DiscountStrategy::Loyal)]);
        let engine = DiscountEngine::new(Arc::new(selector));
        let customer = customer(4, CustomerSegment::Vip);

        let discount = engine.get_discount(Some(&customer), &[], Some(&candidate(dec!(1000))));

        assert_eq!(discount, Decimal::ZERO);
    }

    #[test]
    fn test_repeated_calls_are_identical_and_leave_inputs_untouched() {
        let engine = DiscountEngine::default();
        let customer = customer(5, CustomerSegment::Loyal);
        let history = vec![
            completed(1, dec!(120)),
            completed(2, dec!(80)),
            completed(3, dec!(45.50)),
        ];
        let new_order = candidate(dec!(99.99));

        let customer_before = customer.clone();
        let history_before = history.clone();
        let order_before = new_order.clone();

        let first = engine.get_discount(Some(&customer), &history, Some(&new_order));
        let second = engine.get_discount(Some(&customer), &history, Some(&new_order));

        assert_eq!(first, second);
        assert_eq!(customer, customer_before);
        assert_eq!(history, history_before);
        assert_eq!(new_order, order_before);
    }

    #[test]
    fn test_engine_shares_selector_across_clones() {
        let engine = DiscountEngine::default();
        let clone = engine.clone();
        assert!(Arc::ptr_eq(&engine.selector, &clone.selector));
    }
}
