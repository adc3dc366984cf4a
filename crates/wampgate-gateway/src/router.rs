//! Axum router wiring (HTTP -> WS upgrade).
//!
//! Exposes a single route, the upgrade endpoint, at the configured path.

use axum::routing::get;

use crate::{server::WebsocketServer, transport};

pub fn build_router(server: WebsocketServer, path: &str) -> axum::Router {
    axum::Router::new()
        .route(path, get(transport::ws::ws_upgrade))
        .with_state(server)
}
