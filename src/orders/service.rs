use chrono::{DateTime, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::analytics::{AnalyticsReport, OrderAnalytics};
use crate::customers::{Customer, CustomerSegment, NewCustomer};
use crate::discounts::DiscountEngine;
use crate::orders::{
    CandidateOrder, CreateOrderRequest, NewOrder, Order, OrderError, OrderRepository, OrderStatus,
};

/// Name of the customer seeded into an empty store
pub const DEMO_CUSTOMER_NAME: &str = "John Swagger";

/// Service for order business logic
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    discounts: DiscountEngine,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(repo: Arc<dyn OrderRepository>, discounts: DiscountEngine) -> Self {
        Self { repo, discounts }
    }

    /// Create a new order
    ///
    /// # Arguments
    /// * `request` - Customer and pre-discount total
    ///
    /// # Returns
    /// The stored order, status Pending, charged `total - discount`
    ///
    /// # Errors
    /// * `ValidationError` - Request fails field validation
    /// * `CustomerNotFound` - No customer with the requested ID
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        request.validate()?;

        let customer = self
            .repo
            .find_customer_with_orders(request.customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound(request.customer_id))?;

        // Discount sees the history as it was before this order
        let candidate = CandidateOrder::from(&request);
        let discount = self
            .discounts
            .get_discount(Some(&customer), customer.history(), Some(&candidate));

        let order = self
            .repo
            .insert_order(NewOrder {
                customer_id: customer.id,
                total_amount: candidate.total_amount - discount,
                status: OrderStatus::Pending,
                created_at: Utc::now(),
                delivered_at: None,
            })
            .await?;

        tracing::info!(
            "Created order {} for customer {}: total {} (discount {})",
            order.id,
            customer.id,
            order.total_amount,
            discount
        );

        Ok(order)
    }

    /// Get an order by ID
    pub async fn get_order(&self, order_id: i32) -> Result<Order, OrderError> {
        self.repo
            .find_order(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Summarize every stored order as of `now`
    pub async fn analytics(&self, now: DateTime<Utc>) -> Result<AnalyticsReport, OrderError> {
        let orders = self.repo.list_orders().await?;
        let segments = self.repo.customer_segments().await?;

        Ok(OrderAnalytics::summarize(&orders, &segments, now))
    }

    /// Insert the demo VIP customer when no customers exist yet
    ///
    /// Returns the seeded customer, or `None` if the store was not empty.
    pub async fn seed_demo_customer(&self) -> Result<Option<Customer>, OrderError> {
        if self.repo.count_customers().await? > 0 {
            tracing::debug!("Customers already present, skipping demo seed");
            return Ok(None);
        }

        let customer = self
            .repo
            .insert_customer(NewCustomer {
                name: DEMO_CUSTOMER_NAME.to_string(),
                segment: CustomerSegment::Vip,
            })
            .await?;

        tracing::info!("Seeded demo customer '{}' with id {}", customer.name, customer.id);
        Ok(Some(customer))
    }
}
