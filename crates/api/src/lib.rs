//! HTTP API server for the storefront backend.
//!
//! Serves the catalog, checkout and order history under `/api`, with
//! structured logging (tracing) and Prometheus metrics on `/metrics`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use domain::{CatalogService, CheckoutTransactor};
use metrics_exporter_prometheus::PrometheusHandle;
use read_model::OrderHistory;
use store::Store;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    cors_origins: &[String],
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    let api = Router::new()
        .route("/health", get(routes::health::check))
        .route("/ready", get(routes::health::ready))
        .route("/items", get(routes::items::list).post(routes::items::create))
        .route("/cart/checkout", post(routes::cart::checkout))
        .route("/orders", get(routes::orders::list))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(metrics_router)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Builds the application state around one shared store client.
pub fn create_state(store: Store) -> Arc<AppState> {
    Arc::new(AppState {
        catalog: CatalogService::new(store.clone()),
        checkout: CheckoutTransactor::new(store.clone()),
        order_history: OrderHistory::new(store.clone()),
        store,
    })
}

/// CORS for the configured origins, with credentials.
///
/// Methods and headers mirror the preflight request, since wildcards
/// cannot be combined with credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
