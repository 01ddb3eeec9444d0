//! Axum router configuration for all endpoints.

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::state::AppState;

/// Create the application router with tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Extraction proxy
        .route(
            "/extract-quotation",
            post(handlers::extract_quotation).options(handlers::preflight),
        )
        // Working set
        .route(
            "/quotations",
            get(handlers::list_quotations).post(handlers::add_quotation),
        )
        .route("/quotations/stats", get(handlers::quotation_stats))
        .route("/quotations/facets", get(handlers::quotation_facets))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
