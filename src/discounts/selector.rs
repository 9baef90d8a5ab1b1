// Strategy Selector
//
// Maps a customer segment to the discount strategy that applies to it.
// The table is built once at startup and only read afterwards.

use std::collections::HashMap;

use crate::customers::CustomerSegment;
use crate::discounts::strategy::DiscountStrategy;

/// Read-only lookup from segment to strategy
#[derive(Debug, Clone)]
pub struct StrategySelector {
    table: HashMap<CustomerSegment, DiscountStrategy>,
}

impl StrategySelector {
    /// Build the standard segment table
    pub fn new() -> Self {
        Self::from_table([
            (CustomerSegment::Vip, DiscountStrategy::Vip),
            (CustomerSegment::Default, DiscountStrategy::Regular),
            (CustomerSegment::Loyal, DiscountStrategy::Loyal),
            (CustomerSegment::Premium, DiscountStrategy::Premium),
        ])
    }

    /// Build a selector from an explicit table
    ///
    /// Segments missing from the table resolve to `NoDiscount`.
    pub fn from_table<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CustomerSegment, DiscountStrategy)>,
    {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Strategy bound to `segment`, or `NoDiscount` when unmapped
    pub fn select_strategy(&self, segment: CustomerSegment) -> DiscountStrategy {
        self.table
            .get(&segment)
            .copied()
            .unwrap_or(DiscountStrategy::NoDiscount)
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}
