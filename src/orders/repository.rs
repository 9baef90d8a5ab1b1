use axum::async_trait;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use crate::customers::{Customer, CustomerSegment, NewCustomer};
use crate::orders::error::RepositoryError;
use crate::orders::{NewOrder, Order};

/// Storage for customers and their orders
///
/// Orders reference customers by id only. Loading a customer with its history
/// is a join on `customer_id`, never a pointer walk.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find a customer by ID together with its order history (oldest first)
    async fn find_customer_with_orders(
        &self,
        customer_id: i32,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Register a new customer
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;

    /// Number of registered customers
    async fn count_customers(&self) -> Result<i64, RepositoryError>;

    /// Store a new order
    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Find an order by ID
    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, RepositoryError>;

    /// All stored orders
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Segment of every registered customer, keyed by customer ID
    async fn customer_segments(&self) -> Result<HashMap<i32, CustomerSegment>, RepositoryError>;
}

/// Customer row as stored; the segment is free text in the database
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    segment: String,
}

/// Parse a stored segment label, falling back to the default segment
fn parse_segment(customer_id: i32, raw: &str) -> CustomerSegment {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Customer {} has unrecognized segment '{}', treating as default",
            customer_id,
            raw
        );
        CustomerSegment::default()
    })
}

/// Repository for customers and orders backed by PostgreSQL
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new PgOrderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the bundled migrations
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_customer_with_orders(
        &self,
        customer_id: i32,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, segment FROM customers WHERE id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, delivered_at, total_amount, status, customer_id
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Customer {
            segment: parse_segment(row.id, &row.segment),
            id: row.id,
            name: row.name,
            orders,
        }))
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (name, segment)
            VALUES ($1, $2)
            RETURNING id, name, segment
            "#,
        )
        .bind(&customer.name)
        .bind(customer.segment.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Customer {
            segment: parse_segment(row.id, &row.segment),
            id: row.id,
            name: row.name,
            orders: Vec::new(),
        })
    }

    async fn count_customers(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, total_amount, status, created_at, delivered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, delivered_at, total_amount, status, customer_id
            "#,
        )
        .bind(order.customer_id)
        .bind(order.total_amount)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.delivered_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_order(&self, order_id: i32) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, delivered_at, total_amount, status, customer_id
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, delivered_at, total_amount, status, customer_id
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn customer_segments(&self) -> Result<HashMap<i32, CustomerSegment>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>("SELECT id, name, segment FROM customers")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, parse_segment(row.id, &row.segment)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Queries against PostgreSQL are exercised through the in-memory
    // repository's shared contract tests and the HTTP tests.

    #[test]
    fn test_parse_segment_known_labels() {
        assert_eq!(parse_segment(1, "vip"), CustomerSegment::Vip);
        assert_eq!(parse_segment(1, "Premium"), CustomerSegment::Premium);
    }

    #[test]
    fn test_parse_segment_falls_back_to_default() {
        assert_eq!(parse_segment(1, "platinum"), CustomerSegment::Default);
        assert_eq!(parse_segment(1, ""), CustomerSegment::Default);
    }
}
