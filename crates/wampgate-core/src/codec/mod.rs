//! Payload codecs.
//!
//! A [`Serializer`] turns one frame payload into one [`Message`] and back.
//! The transport only depends on this capability; which concrete codec a
//! connection uses is decided by the negotiated subprotocol.

mod json;
mod msgpack;

pub use json::JsonSerializer;
pub use msgpack::MsgpackSerializer;

use crate::error::Result;
use crate::protocol::Message;

pub trait Serializer: Send + Sync {
    /// Short codec name for logs and error context.
    fn name(&self) -> &'static str;

    fn serialize(&self, msg: &Message) -> Result<Vec<u8>>;

    fn deserialize(&self, payload: &[u8]) -> Result<Message>;
}
