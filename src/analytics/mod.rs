pub mod aggregator;
pub mod report;

pub use aggregator::{OrderAnalytics, UNKNOWN_SEGMENT};
pub use report::{format_elapsed, AnalyticsReport, CompletionRate, FulfillmentTime, NOT_APPLICABLE};
