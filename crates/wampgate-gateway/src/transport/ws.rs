//! WebSocket upgrade handler.
//!
//! Responsibilities:
//! - Reject requests that cannot be upgraded (400 with the error text)
//! - Apply the origin policy
//! - Negotiate the subprotocol against the registry's advertised tokens
//! - After upgrade: resolve the token, build the peer, hand it to the router

use std::sync::Arc;

use axum::{
    extract::ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
    extract::State,
    http::{header::SEC_WEBSOCKET_PROTOCOL, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use futures_util::SinkExt;

use wampgate_core::error::{Result, WampGateError};

use crate::registry::{builtin_entry, ProtocolEntry, ProtocolRegistry};
use crate::server::WebsocketServer;
use crate::transport::handshake::{negotiate, UpgradeRequest};
use crate::transport::peer::WebsocketPeer;

pub async fn ws_upgrade(
    State(server): State<WebsocketServer>,
    uri: Uri,
    headers: HeaderMap,
    upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => return upgrade_failed(WampGateError::UpgradeFailed(rejection.body_text())),
    };

    let req = UpgradeRequest::new(&uri, &headers);
    if !server.origin_policy().check(&req) {
        return upgrade_failed(WampGateError::UpgradeFailed(format!(
            "request origin not allowed: {}",
            req.origin().unwrap_or_default()
        )));
    }

    // echoed here rather than through `WebSocketUpgrade::protocols`, which
    // only looks at the first Sec-WebSocket-Protocol header
    let negotiated = negotiate(&req.requested_protocols(), server.protocols())
        .and_then(|token| HeaderValue::from_str(&token).ok().map(|value| (token, value)));
    let (token, header) = negotiated.unzip();

    let mut response = ws.on_upgrade(move |socket| handle_socket(server, socket, token));
    if let Some(header) = header {
        response.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, header);
    }
    response
}

fn upgrade_failed(err: WampGateError) -> Response {
    tracing::warn!(error = %err, code = err.code().as_str(), "websocket upgrade rejected");
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

async fn handle_socket(server: WebsocketServer, mut socket: WebSocket, negotiated: Option<String>) {
    let entry = match resolve_protocol(server.registry(), negotiated.as_deref()) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(error = %err, code = err.code().as_str(), "closing connection");
            let _ = SinkExt::close(&mut socket).await;
            return;
        }
    };

    tracing::info!(protocol = %entry.token, frame_kind = %entry.frame_kind, "websocket connected");
    let peer = WebsocketPeer::from_socket(socket, entry, server.decode_policy());
    server.router().accept(Arc::new(peer));
}

/// Map the negotiated token to its frame kind and serializer.
///
/// The upgrader only offers registered tokens, so the built-in fallback is
/// reached only if negotiation and registry ever disagree.
pub fn resolve_protocol(registry: &ProtocolRegistry, negotiated: Option<&str>) -> Result<ProtocolEntry> {
    let token = negotiated.unwrap_or_default();
    if let Some(entry) = registry.resolve(token) {
        return Ok(entry.clone());
    }
    builtin_entry(token).ok_or_else(|| WampGateError::UnrecognizedProtocol(token.to_string()))
}
