// HTTP handlers for order endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::analytics::AnalyticsReport;
use crate::error::ApiError;
use crate::orders::{CreateOrderRequest, Order};

/// Handler for POST /api/orders
/// Prices and stores a new order for an existing customer
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with the customer's discount applied", body = Order),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error_code": "VALIDATION_ERROR"})),
        (status = 404, description = "Customer not found", body = String, example = json!({"error_code": "NOT_FOUND"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error_code": "DATABASE_ERROR"}))
    ),
    tag = "orders"
)]
pub async fn create_order_handler(
    State(state): State<crate::AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(request) = payload?;
    tracing::debug!(
        "Creating order for customer {} with total {}",
        request.customer_id,
        request.total_amount
    );

    let order = state.order_service.create_order(request).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Handler for GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found", body = String, example = json!({"error_code": "NOT_FOUND"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error_code": "DATABASE_ERROR"}))
    ),
    tag = "orders"
)]
pub async fn get_order_handler(
    State(state): State<crate::AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<Order>, ApiError> {
    tracing::debug!("Fetching order with id: {}", order_id);

    let order = state.order_service.get_order(order_id).await?;

    Ok(Json(order))
}

/// Handler for GET /api/orders/analytics
/// Summarizes every stored order as of the current time
#[utoipa::path(
    get,
    path = "/api/orders/analytics",
    responses(
        (status = 200, description = "Order analytics", body = AnalyticsReport),
        (status = 500, description = "Internal server error", body = String, example = json!({"error_code": "DATABASE_ERROR"}))
    ),
    tag = "orders"
)]
pub async fn get_analytics_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let report = state.order_service.analytics(Utc::now()).await?;

    tracing::debug!("Analytics computed over {} orders", report.total_orders);
    Ok(Json(report))
}
