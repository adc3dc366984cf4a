//! Wire-level vocabulary: frame kinds, well-known subprotocol tokens, and the
//! opaque application message with its element values.

pub mod frame;
pub mod message;
pub mod value;

pub use frame::FrameKind;
pub use message::Message;
pub use value::Value;

/// Subprotocol token for JSON encoding over text frames.
pub const JSON_PROTOCOL: &str = "wamp.2.json";

/// Subprotocol token for MessagePack encoding over binary frames.
pub const MSGPACK_PROTOCOL: &str = "wamp.2.msgpack";
