use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{RateLimiter, rate_limit},
    routes,
};

/// Assembles the API router. The rate limit layer is scoped to the generate
/// route so health checks are never throttled.
pub fn create_router(state: AppState, limiter: Arc<RateLimiter>) -> Router {
    let generate_routes = Router::new()
        .route("/generate", post(routes::generate::generate))
        .layer(axum::middleware::from_fn_with_state(limiter, rate_limit));

    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(generate_routes)
                .route("/health", get(routes::health::ping)),
        )
        .with_state(state)
}
