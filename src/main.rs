//! Spraay gateway server binary.

use std::sync::Arc;

use axum::routing::get;
use http::HeaderValue;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use spraay_gateway::adapters::websocket::{gateway_router, GatewayState, RoomManager};
use spraay_gateway::application::SprayBroadcaster;
use spraay_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let rooms = Arc::new(RoomManager::new(config.gateway.room_channel_capacity));
    let broadcaster = Arc::new(SprayBroadcaster::new(rooms.clone()));
    let state = GatewayState::new(rooms, broadcaster, config.gateway.send_buffer);

    let app = Router::new()
        .merge(gateway_router())
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Spraay gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Spraay gateway stopped");
    Ok(())
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// CORS for upgrade requests from browser clients.
///
/// Without configured origins (development) all origins are allowed.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
