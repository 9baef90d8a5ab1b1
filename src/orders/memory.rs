use axum::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::customers::{Customer, CustomerSegment, NewCustomer};
use crate::orders::error::RepositoryError;
use crate::orders::{NewOrder, Order, OrderRepository};

#[derive(Debug, Clone)]
struct StoredCustomer {
    name: String,
    segment: CustomerSegment,
}

#[derive(Debug, Default)]
struct MemoryState {
    customers: BTreeMap<i32, StoredCustomer>,
    orders: BTreeMap<i32, Order>,
    last_customer_id: i32,
    last_order_id: i32,
}

/// Repository kept entirely in process memory
///
/// Used when no database is configured and by the test suite. IDs are
/// assigned sequentially starting at 1, like a SERIAL column.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryOrderRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_customer_with_orders(
        &self,
        customer_id: i32,
    ) -> Result<Option<Customer>, RepositoryError> {
        let state = self.state.read().await;

        let Some(stored) = state.customers.get(&customer_id) else {
            return Ok(None);
        };

        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(Some(Customer {
            id: customer_id,
            name: stored.name.clone(),
            segment: stored.segment,
            orders,
        }))
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut state = self.state.write().await;

        state.last_customer_id += 1;
        let id = state.last_customer_id;
        state.customers.insert(
            id,
            StoredCustomer {
                name: customer.name.clone(),
                segment: customer.segment,
            },
        );

        Ok(Customer {
            id,
            name: customer.name,
            segment: customer.segment,
            orders: Vec::new(),
        })
    }

    async fn count_customers(&self) -> Result<i64, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.customers.len() as i64)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut state = self.state.write().await;

        state.last_order_id += 1;
        let stored = Order {
            id: state.last_order_id,
            created_at: order.created_at,
            delivered_at: order.delivered_at,
            total_amount: order.total_amount,
            status: order.status,
            customer_id: order.customer_id,
        };
        state.orders.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.orders.get(&order_id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.orders.values().cloned().collect())
    }

    async fn customer_segments(&self) -> Result<HashMap<i32, CustomerSegment>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .customers
            .iter()
            .map(|(id, customer)| (*id, customer.segment))
            .collect())
    }
}
