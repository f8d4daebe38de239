use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use mockup_backend::{AppState, config::Config, middleware::RateLimiter, router::create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; generation requests will be rejected");
    }

    let state = AppState {
        config: config.clone(),
        http: reqwest::Client::new(),
    };
    let limiter = Arc::new(RateLimiter::new());

    let router = create_router(state, limiter);

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
