//! Frame codec for the transport layer.
//!
//! - Text and Binary frames carry payload bytes for the connection's serializer
//! - Ping/Pong are answered by the WebSocket layer and skipped here
//! - Close ends the connection

use axum::extract::ws::Message as WsMessage;

use wampgate_core::error::{Result, WampGateError};
use wampgate_core::FrameKind;

#[derive(Debug)]
pub enum Inbound {
    Data { kind: FrameKind, payload: Vec<u8> },
    Control,
    Close,
}

pub fn classify(frame: WsMessage) -> Inbound {
    match frame {
        WsMessage::Text(s) => Inbound::Data {
            kind: FrameKind::Text,
            payload: s.into_bytes(),
        },
        WsMessage::Binary(b) => Inbound::Data {
            kind: FrameKind::Binary,
            payload: b,
        },
        WsMessage::Ping(_) | WsMessage::Pong(_) => Inbound::Control,
        WsMessage::Close(_) => Inbound::Close,
    }
}

/// Wrap serialized bytes in a frame of the connection's kind.
/// Text frames must hold UTF-8.
pub fn encode_frame(kind: FrameKind, codec: &'static str, payload: Vec<u8>) -> Result<WsMessage> {
    match kind {
        FrameKind::Text => String::from_utf8(payload)
            .map(WsMessage::Text)
            .map_err(|e| WampGateError::EncodeFailure {
                codec,
                reason: format!("text frame payload is not utf-8: {e}"),
            }),
        FrameKind::Binary => Ok(WsMessage::Binary(payload)),
    }
}
