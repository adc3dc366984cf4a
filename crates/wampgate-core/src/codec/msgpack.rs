use crate::error::{Result, WampGateError};
use crate::protocol::Message;

use super::Serializer;

/// MessagePack codec, carried on binary frames by convention.
///
/// Binary values travel as `bin`, and map keys keep whatever type they were
/// sent with.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgpackSerializer;

impl MsgpackSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for MsgpackSerializer {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn serialize(&self, msg: &Message) -> Result<Vec<u8>> {
        rmp_serde::to_vec(msg).map_err(|e| WampGateError::EncodeFailure {
            codec: "msgpack",
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, payload: &[u8]) -> Result<Message> {
        rmp_serde::from_slice(payload).map_err(|e| WampGateError::DecodeFailure {
            codec: "msgpack",
            reason: e.to_string(),
        })
    }
}
