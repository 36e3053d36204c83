//! Top-level router assembly.

use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::registry::SessionRegistry;
use crate::adapters::websocket::{websocket_routes, BroadcastCoordinator, WebSocketState};
use crate::config::AppConfig;

use super::health::health_routes;
use super::session::{session_routes, SessionHandlers};

/// Build the full application router: REST under `/api`, live updates at
/// `/ws`.
pub fn build_router(
    config: &AppConfig,
    registry: Arc<SessionRegistry>,
    coordinator: Arc<BroadcastCoordinator>,
) -> Router {
    let handlers = SessionHandlers::new(Arc::clone(&registry), coordinator.clone());
    let ws_state = WebSocketState::new(
        registry,
        coordinator,
        config.broadcast.connection_buffer,
    );

    Router::new()
        .nest("/api/sessions", session_routes(handlers))
        .merge(health_routes())
        .merge(websocket_routes(ws_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins()))
}

/// Any origin when none are configured, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
