// Discount Strategies
//
// One formula per customer segment. The set is closed: every strategy is a
// variant of `DiscountStrategy` and is evaluated by an exhaustive match.

use rust_decimal::Decimal;
use std::fmt;

use crate::customers::Customer;
use crate::orders::{CandidateOrder, Order};

/// VIP customers get 15% off every order
pub const VIP_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Loyal customers with enough completed orders get 5% off
pub const LOYAL_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Completed orders required before the loyal discount applies
pub const LOYAL_MIN_COMPLETED_ORDERS: usize = 3;

/// Premium rate once lifetime spend exceeds the threshold
pub const PREMIUM_HIGH_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Premium rate below the spend threshold
pub const PREMIUM_BASE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Lifetime spend (exclusive) above which premium customers get the high rate
pub const PREMIUM_SPEND_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// A discount formula bound to a customer segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountStrategy {
    /// Fallback for segments without a mapping
    NoDiscount,
    Vip,
    /// Regular customers (the `Default` segment)
    Regular,
    Loyal,
    Premium,
}

impl DiscountStrategy {
    /// Calculate the discount amount for a new order
    ///
    /// Pure function of its inputs. The result is always between zero and
    /// `new_order.total_amount` for a non-negative total.
    pub fn calculate_discount(
        &self,
        _customer: &Customer,
        history: &[Order],
        new_order: &CandidateOrder,
    ) -> Decimal {
        let total = new_order.total_amount;

        match self {
            DiscountStrategy::NoDiscount | DiscountStrategy::Regular => Decimal::ZERO,
            DiscountStrategy::Vip => total * VIP_RATE,
            DiscountStrategy::Loyal => {
                let completed = history
                    .iter()
                    .filter(|order| order.status.is_completed())
                    .count();

                if completed >= LOYAL_MIN_COMPLETED_ORDERS {
                    total * LOYAL_RATE
                } else {
                    Decimal::ZERO
                }
            }
            DiscountStrategy::Premium => {
                // Status-agnostic: cancelled orders count toward lifetime spend too.
                // A spend too large to represent is above the threshold.
                let above_threshold = history
                    .iter()
                    .try_fold(Decimal::ZERO, |spend, order| spend.checked_add(order.total_amount))
                    .map_or(true, |spend| spend > PREMIUM_SPEND_THRESHOLD);

                if above_threshold {
                    total * PREMIUM_HIGH_RATE
                } else {
                    total * PREMIUM_BASE_RATE
                }
            }
        }
    }
}

impl fmt::Display for DiscountStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountStrategy::NoDiscount => write!(f, "no_discount"),
            DiscountStrategy::Vip => write!(f, "vip"),
            DiscountStrategy::Regular => write!(f, "regular"),
            DiscountStrategy::Loyal => write!(f, "loyal"),
            DiscountStrategy::Premium => write!(f, "premium"),
        }
    }
}
