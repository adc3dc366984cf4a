//! wampgate gateway binary.
//!
//! - Config: `wampgate.yaml`, or the path given as first argument
//! - WebSocket endpoint: `gateway.path` (default `/ws`)
//! - Subprotocols: wamp.2.json, wamp.2.msgpack, plus configured extras

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use wampgate_core::error::{Result, WampGateError};
use wampgate_gateway::router::build_router;
use wampgate_gateway::{config, BasicRouter, WebsocketServer};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "wampgate-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "wampgate.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let router = Arc::new(BasicRouter::new());
    let server = WebsocketServer::from_config(&cfg, router.clone())?;
    let app = build_router(server, &cfg.gateway.path);

    tracing::info!(%listen, path = %cfg.gateway.path, "wampgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| WampGateError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WampGateError::Internal(format!("server failed: {e}")))?;

    tracing::info!(sessions = router.session_count(), "shutting down");
    router.close_all().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "ctrl-c handler failed");
        std::future::pending::<()>().await;
    }
}
