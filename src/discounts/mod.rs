// Discount Module
//
// Computes the discount for a customer's new order from the customer's segment
// and order history:
// - Strategies: one closed set of formulas (no discount, VIP, regular, loyal, premium)
// - Selector: fixed segment -> strategy table, built once at startup
// - Engine: facade that handles missing inputs and dispatches to the selector
//
// Everything here is pure and synchronous; no I/O happens in this module.

pub mod engine;
pub mod selector;
pub mod strategy;

pub use engine::DiscountEngine;
pub use selector::StrategySelector;
pub use strategy::DiscountStrategy;
