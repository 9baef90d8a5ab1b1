use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::orders::Order;

/// Customer classification driving discount eligibility
///
/// The set is closed: a new segment needs a new variant here and an entry in
/// the discount strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CustomerSegment {
    Default,
    #[serde(rename = "VIP")]
    Vip,
    Loyal,
    Premium,
}

impl CustomerSegment {
    /// Display label, also used as the analytics grouping key
    pub fn label(&self) -> &'static str {
        match self {
            CustomerSegment::Default => "Default",
            CustomerSegment::Vip => "VIP",
            CustomerSegment::Loyal => "Loyal",
            CustomerSegment::Premium => "Premium",
        }
    }

    /// Storage representation (lowercase text column)
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerSegment::Default => "default",
            CustomerSegment::Vip => "vip",
            CustomerSegment::Loyal => "loyal",
            CustomerSegment::Premium => "premium",
        }
    }
}

impl Default for CustomerSegment {
    fn default() -> Self {
        CustomerSegment::Default
    }
}

impl fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for CustomerSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "regular" => Ok(CustomerSegment::Default),
            "vip" => Ok(CustomerSegment::Vip),
            "loyal" => Ok(CustomerSegment::Loyal),
            "premium" => Ok(CustomerSegment::Premium),
            _ => Err(format!("Invalid customer segment: {}", s)),
        }
    }
}

/// A customer together with its order history
///
/// The customer is the aggregation root for history: orders are looked up
/// through the customer, never the other way round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub segment: CustomerSegment,
    pub orders: Vec<Order>,
}

impl Customer {
    /// Previously recorded orders, oldest first
    pub fn history(&self) -> &[Order] {
        &self.orders
    }
}

/// Data needed to register a customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub segment: CustomerSegment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_segment_display_matches_label() {
        assert_eq!(CustomerSegment::Default.to_string(), "Default");
        assert_eq!(CustomerSegment::Vip.to_string(), "VIP");
        assert_eq!(CustomerSegment::Loyal.to_string(), "Loyal");
        assert_eq!(CustomerSegment::Premium.to_string(), "Premium");
    }

    #[test]
    fn test_segment_from_str_is_case_insensitive() {
        assert_eq!(CustomerSegment::from_str("VIP").unwrap(), CustomerSegment::Vip);
        assert_eq!(CustomerSegment::from_str("vip").unwrap(), CustomerSegment::Vip);
        assert_eq!(CustomerSegment::from_str("Premium").unwrap(), CustomerSegment::Premium);
        assert_eq!(CustomerSegment::from_str("regular").unwrap(), CustomerSegment::Default);
        assert!(CustomerSegment::from_str("gold").is_err());
    }

    #[test]
    fn test_segment_storage_round_trip() {
        for segment in [
            CustomerSegment::Default,
            CustomerSegment::Vip,
            CustomerSegment::Loyal,
            CustomerSegment::Premium,
        ] {
            assert_eq!(CustomerSegment::from_str(segment.as_str()).unwrap(), segment);
        }
    }

    #[test]
    fn test_segment_defaults_to_default() {
        assert_eq!(CustomerSegment::default(), CustomerSegment::Default);
    }

    #[test]
    fn test_segment_serialization() {
        assert_eq!(serde_json::to_string(&CustomerSegment::Vip).unwrap(), "\"VIP\"");
        assert_eq!(serde_json::to_string(&CustomerSegment::Loyal).unwrap(), "\"Loyal\"");

        let segment: CustomerSegment = serde_json::from_str("\"VIP\"").unwrap();
        assert_eq!(segment, CustomerSegment::Vip);
    }
}
