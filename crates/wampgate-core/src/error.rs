//! Shared error type across wampgate crates.

use thiserror::Error;

/// Stable error codes, used in log fields and asserted by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Registration used a frame kind other than text/binary.
    InvalidFrameKind,
    /// A subprotocol token was registered twice.
    ProtocolAlreadyRegistered,
    /// The HTTP -> WebSocket handshake could not complete.
    UpgradeFailed,
    /// Negotiated token has no registry entry and no built-in fallback.
    UnrecognizedProtocol,
    /// Transport-level read error.
    FrameReadFailure,
    /// Payload could not be deserialized.
    DecodeFailure,
    /// Message could not be serialized.
    EncodeFailure,
    /// Realm name already registered.
    RealmExists,
    /// Realm name unknown to the router.
    RealmNotFound,
    /// Peer is closed.
    ConnectionClosed,
    /// Invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidFrameKind => "INVALID_FRAME_KIND",
            ErrorCode::ProtocolAlreadyRegistered => "PROTOCOL_ALREADY_REGISTERED",
            ErrorCode::UpgradeFailed => "UPGRADE_FAILED",
            ErrorCode::UnrecognizedProtocol => "UNRECOGNIZED_PROTOCOL",
            ErrorCode::FrameReadFailure => "FRAME_READ_FAILURE",
            ErrorCode::DecodeFailure => "DECODE_FAILURE",
            ErrorCode::EncodeFailure => "ENCODE_FAILURE",
            ErrorCode::RealmExists => "REALM_EXISTS",
            ErrorCode::RealmNotFound => "REALM_NOT_FOUND",
            ErrorCode::ConnectionClosed => "CONNECTION_CLOSED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WampGateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum WampGateError {
    #[error("invalid frame kind: {0}")]
    InvalidFrameKind(String),
    #[error("protocol already registered: {0}")]
    ProtocolAlreadyRegistered(String),
    #[error("websocket upgrade failed: {0}")]
    UpgradeFailed(String),
    #[error("unrecognized subprotocol: {0:?}")]
    UnrecognizedProtocol(String),
    #[error("frame read failed: {0}")]
    FrameReadFailure(String),
    #[error("decode failed ({codec}): {reason}")]
    DecodeFailure { codec: &'static str, reason: String },
    #[error("encode failed ({codec}): {reason}")]
    EncodeFailure { codec: &'static str, reason: String },
    #[error("realm already exists: {0}")]
    RealmExists(String),
    #[error("no such realm: {0}")]
    RealmNotFound(String),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WampGateError {
    /// Map to the stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WampGateError::InvalidFrameKind(_) => ErrorCode::InvalidFrameKind,
            WampGateError::ProtocolAlreadyRegistered(_) => ErrorCode::ProtocolAlreadyRegistered,
            WampGateError::UpgradeFailed(_) => ErrorCode::UpgradeFailed,
            WampGateError::UnrecognizedProtocol(_) => ErrorCode::UnrecognizedProtocol,
            WampGateError::FrameReadFailure(_) => ErrorCode::FrameReadFailure,
            WampGateError::DecodeFailure { .. } => ErrorCode::DecodeFailure,
            WampGateError::EncodeFailure { .. } => ErrorCode::EncodeFailure,
            WampGateError::RealmExists(_) => ErrorCode::RealmExists,
            WampGateError::RealmNotFound(_) => ErrorCode::RealmNotFound,
            WampGateError::ConnectionClosed => ErrorCode::ConnectionClosed,
            WampGateError::BadConfig(_) => ErrorCode::BadConfig,
            WampGateError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            WampGateError::Internal(_) => ErrorCode::Internal,
        }
    }
}
