pub mod analytics;
pub mod config;
pub mod customers;
pub mod db;
pub mod discounts;
pub mod error;
pub mod orders;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use analytics::AnalyticsReport;
use config::AppConfig;
use customers::CustomerSegment;
use discounts::{DiscountEngine, StrategySelector};
use orders::{
    CreateOrderRequest, InMemoryOrderRepository, Order, OrderRepository, OrderService,
    OrderStatus, PgOrderRepository,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        orders::handlers::create_order_handler,
        orders::handlers::get_order_handler,
        orders::handlers::get_analytics_handler,
    ),
    components(
        schemas(Order, OrderStatus, CreateOrderRequest, AnalyticsReport, CustomerSegment)
    ),
    tags(
        (name = "orders", description = "Order placement with segment discounts, and order analytics")
    ),
    info(
        title = "Order Discount API",
        version = "1.0.0",
        description = "Places orders with customer-segment discounts and reports order analytics"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService,
}

impl AppState {
    /// Build state over a repository with the standard discount table
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        let discounts = DiscountEngine::new(Arc::new(StrategySelector::new()));
        Self {
            order_service: OrderService::new(repo, discounts),
        }
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    // Allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/orders", post(orders::create_order_handler))
        .route("/api/orders/analytics", get(orders::get_analytics_handler))
        .route("/api/orders/:id", get(orders::get_order_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// PostgreSQL when a database is configured, otherwise process memory
async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn OrderRepository>, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = db::create_pool(database_url, config.db_max_connections).await?;

            let repo = PgOrderRepository::new(pool);
            tracing::info!("Running database migrations...");
            repo.migrate().await?;
            tracing::info!("Migrations completed successfully");

            Ok(Arc::new(repo))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory only");
            Ok(Arc::new(InMemoryOrderRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Order Discount API - Starting...");

    let config = AppConfig::from_env()?;
    let repo = build_repository(&config).await?;
    let state = AppState::new(repo);

    if config.seed_demo_customer {
        state.order_service.seed_demo_customer().await?;
    }

    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Order Discount API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
