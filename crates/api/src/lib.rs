//! HTTP API server for the sales back office.
//!
//! Provides REST endpoints for customers, contacts, products, inventory,
//! users, quotations, orders, and reports, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    use routes::{
        contacts, customers, dashboard, health, inventory, metrics, orders, products, quotations,
        reports, users,
    };

    let metrics_router = Router::new()
        .route("/metrics", get(metrics::get))
        .with_state(metrics_handle);

    let api = Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route("/customers/{id}/contacts", get(customers::contacts))
        .route("/customers/{id}/orders", get(customers::orders))
        .route("/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/contacts/{id}",
            get(contacts::get).put(contacts::update).delete(contacts::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/products/{id}/inventory", get(inventory::for_product))
        .route("/inventory", get(inventory::list).post(inventory::create))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route(
            "/inventory/{id}",
            get(inventory::get)
                .put(inventory::update)
                .delete(inventory::delete),
        )
        .route("/inventory/{id}/restock", post(inventory::restock))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/quotations", get(quotations::list).post(quotations::create))
        .route(
            "/quotations/{id}",
            get(quotations::get)
                .put(quotations::update)
                .delete(quotations::delete),
        )
        .route("/quotations/{id}/status", post(quotations::update_status))
        .route("/dashboard", get(dashboard::summary))
        .route("/reports/sales", get(reports::sales))
        .route("/reports/sales/export", get(reports::sales_export))
        .route("/reports/top-customers", get(reports::top_customers))
        .route(
            "/reports/top-customers/export",
            get(reports::top_customers_export),
        )
        .route("/reports/low-stock", get(reports::low_stock))
        .route("/reports/low-stock/export", get(reports::low_stock_export));

    Router::new()
        .route("/health", get(health::check))
        .nest("/api", api)
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
