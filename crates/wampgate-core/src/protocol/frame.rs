//! Frame kinds a subprotocol can be carried on.

use std::fmt;
use std::str::FromStr;

use crate::error::WampGateError;

/// WebSocket opcode for text frames.
pub const TEXT_OPCODE: u8 = 0x1;
/// WebSocket opcode for binary frames.
pub const BINARY_OPCODE: u8 = 0x2;

/// Whether a subprotocol's payloads travel in text or binary frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Text,
    Binary,
}

impl FrameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Text => "text",
            FrameKind::Binary => "binary",
        }
    }

    pub fn opcode(self) -> u8 {
        match self {
            FrameKind::Text => TEXT_OPCODE,
            FrameKind::Binary => BINARY_OPCODE,
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw data-frame opcode. Only text and binary carry application payloads.
impl TryFrom<u8> for FrameKind {
    type Error = WampGateError;

    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        match opcode {
            TEXT_OPCODE => Ok(FrameKind::Text),
            BINARY_OPCODE => Ok(FrameKind::Binary),
            other => Err(WampGateError::InvalidFrameKind(format!("opcode {other}"))),
        }
    }
}

impl FromStr for FrameKind {
    type Err = WampGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FrameKind::Text),
            "binary" => Ok(FrameKind::Binary),
            _ => Err(WampGateError::InvalidFrameKind(s.to_string())),
        }
    }
}
