use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Order status enum representing the lifecycle of an order
///
/// Only `Completed` carries meaning for discounts and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Pending,
    Completed,
}

impl OrderStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(OrderStatus::Created),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Created
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a stored order
///
/// `customer_id` is a lookup key into the customer store. An order never owns
/// or embeds its customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = 1)]
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    /// Charged total, after any discount
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 850.0)]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[schema(example = 1)]
    pub customer_id: i32,
}

/// An order being placed, before it is priced and stored
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOrder {
    pub customer_id: i32,
    pub total_amount: Decimal,
}

/// Everything the repository needs to insert an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Request DTO for creating a new order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "Customer id must be positive"))]
    #[schema(example = 1)]
    pub customer_id: i32,
    /// Total before discount
    #[validate(custom = "crate::validation::validate_order_amount")]
    #[schema(value_type = f64, example = 1000.0)]
    pub total_amount: Decimal,
}

impl From<&CreateOrderRequest> for CandidateOrder {
    fn from(request: &CreateOrderRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            total_amount: request.total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_status_default_is_created() {
        assert_eq!(OrderStatus::default(), OrderStatus::Created);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(OrderStatus::from_str("completed").unwrap(), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_str("Pending").unwrap(), OrderStatus::Pending);
        assert!(OrderStatus::from_str("refunded").is_err());
    }

    #[test]
    fn test_only_completed_is_completed() {
        assert!(OrderStatus::Completed.is_completed());
        assert!(!OrderStatus::Delivered.is_completed());
        assert!(!OrderStatus::Pending.is_completed());
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            id: 7,
            created_at: Utc::now(),
            delivered_at: None,
            total_amount: dec!(850.00),
            status: OrderStatus::Pending,
            customer_id: 1,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["customerId"], 1);
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["totalAmount"].as_f64(), Some(850.0));
        assert!(json["createdAt"].is_string());
        assert!(json["deliveredAt"].is_null());
    }

    #[test]
    fn test_create_order_request_deserialization() {
        let json = r#"{ "customerId": 3, "totalAmount": 1000 }"#;
        let request: CreateOrderRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.customer_id, 3);
        assert_eq!(request.total_amount, dec!(1000));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_order_request_rejects_negative_amount() {
        let request = CreateOrderRequest {
            customer_id: 1,
            total_amount: dec!(-5),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_order_request_rejects_amount_over_limit() {
        let request = CreateOrderRequest {
            customer_id: 1,
            total_amount: dec!(50000000000000000000000000000),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("total_amount"));
    }

    #[test]
    fn test_create_order_request_rejects_non_positive_customer() {
        let request = CreateOrderRequest {
            customer_id: 0,
            total_amount: dec!(10),
        };
        assert!(request.validate().is_err());
    }
}
