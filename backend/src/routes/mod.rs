//! Route definitions for the back-office stock alerts service

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - stock alerts
        .nest("/stock/alerts", stock_alert_routes())
        // Protected routes - purchase orders
        .nest("/purchase-orders", purchase_order_routes())
}

/// Stock alert routes (protected)
fn stock_alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_alerts))
        .route("/active", get(handlers::get_active_alerts))
        .route("/historical", get(handlers::get_historical_alerts))
        .route("/refresh", post(handlers::refresh_alerts))
        .route("/:product_id/action", get(handlers::get_alert_action))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase order routes (protected)
fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/quick", post(handlers::create_quick_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/validate", post(handlers::validate_order))
        .route_layer(middleware::from_fn(auth_middleware))
}
