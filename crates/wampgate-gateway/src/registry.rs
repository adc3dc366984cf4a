//! Subprotocol registry.
//!
//! Maps a negotiated subprotocol token to the frame kind and serializer used
//! for the connection. The registry is filled during server setup and then
//! frozen behind an `Arc`; connection handling only ever reads it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use wampgate_core::error::{Result, WampGateError};
use wampgate_core::{FrameKind, JsonSerializer, MsgpackSerializer, Serializer};
use wampgate_core::{JSON_PROTOCOL, MSGPACK_PROTOCOL};

/// One registered subprotocol.
#[derive(Clone)]
pub struct ProtocolEntry {
    pub token: String,
    pub frame_kind: FrameKind,
    pub serializer: Arc<dyn Serializer>,
}

impl fmt::Debug for ProtocolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolEntry")
            .field("token", &self.token)
            .field("frame_kind", &self.frame_kind)
            .field("serializer", &self.serializer.name())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ProtocolRegistry {
    entries: HashMap<String, ProtocolEntry>,
    // advertised to the upgrader, in registration order
    tokens: Vec<String>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `wamp.2.json` (text) and `wamp.2.msgpack` (binary).
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        for token in [JSON_PROTOCOL, MSGPACK_PROTOCOL] {
            if let Some(entry) = builtin_entry(token) {
                reg.insert(entry);
            }
        }
        reg
    }

    pub fn register(
        &mut self,
        token: impl Into<String>,
        frame_kind: FrameKind,
        serializer: Arc<dyn Serializer>,
    ) -> Result<()> {
        let token = token.into();
        if self.entries.contains_key(&token) {
            return Err(WampGateError::ProtocolAlreadyRegistered(token));
        }
        tracing::debug!(protocol = %token, frame_kind = %frame_kind, codec = serializer.name(), "protocol registered");
        self.insert(ProtocolEntry {
            token,
            frame_kind,
            serializer,
        });
        Ok(())
    }

    /// Register using a raw WebSocket data opcode (1 = text, 2 = binary).
    pub fn register_opcode(
        &mut self,
        token: impl Into<String>,
        opcode: u8,
        serializer: Arc<dyn Serializer>,
    ) -> Result<()> {
        let frame_kind = FrameKind::try_from(opcode)?;
        self.register(token, frame_kind, serializer)
    }

    pub fn resolve(&self, token: &str) -> Option<&ProtocolEntry> {
        self.entries.get(token)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: ProtocolEntry) {
        self.tokens.push(entry.token.clone());
        self.entries.insert(entry.token.clone(), entry);
    }
}

/// Rebuild the entry for one of the two well-known tokens without consulting
/// any registry.
pub fn builtin_entry(token: &str) -> Option<ProtocolEntry> {
    let (frame_kind, serializer): (FrameKind, Arc<dyn Serializer>) = match token {
        JSON_PROTOCOL => (FrameKind::Text, Arc::new(JsonSerializer::new())),
        MSGPACK_PROTOCOL => (FrameKind::Binary, Arc::new(MsgpackSerializer::new())),
        _ => return None,
    };
    Some(ProtocolEntry {
        token: token.to_string(),
        frame_kind,
        serializer,
    })
}
