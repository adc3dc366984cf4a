use crate::error::{Result, WampGateError};
use crate::protocol::Message;

use super::Serializer;

/// JSON codec, carried on text frames by convention.
///
/// Binary values are written as a NUL-prefixed base64 string.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, msg: &Message) -> Result<Vec<u8>> {
        serde_json::to_vec(msg).map_err(|e| WampGateError::EncodeFailure {
            codec: "json",
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, payload: &[u8]) -> Result<Message> {
        serde_json::from_slice(payload).map_err(|e| WampGateError::DecodeFailure {
            codec: "json",
            reason: e.to_string(),
        })
    }
}
