//! Nocturne server binary.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use nocturne::adapters::http::{api_router, health};
use nocturne::adapters::websocket::{ws_router, ConnectionRegistry, WsState};
use nocturne::adapters::{InMemoryIdentityStore, ThreadRngRoller};
use nocturne::application::AppState;
use nocturne::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let registry = Arc::new(ConnectionRegistry::new(config.server.channel_capacity));
    let app_state = AppState::new(
        Arc::new(InMemoryIdentityStore::new()),
        registry.clone(),
        Arc::new(ThreadRngRoller::new()),
    );
    let ws_state = WsState::new(app_state.clone(), registry);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router().with_state(app_state))
        .merge(ws_router().with_state(ws_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "nocturne listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app).await.expect("server error");
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        // Development default: the companion pages are served from anywhere.
        CorsLayer::new().allow_origin(Any).allow_methods(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
    }
}
