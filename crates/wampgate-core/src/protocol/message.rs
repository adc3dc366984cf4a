//! Opaque application message.
//!
//! The transport never interprets message contents. A message is kept in the
//! array form every WAMP encoding shares (`[type_code, ...]`) so that each
//! serializer can round-trip it without knowing the message vocabulary.

use serde::{Deserialize, Serialize};

use super::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Vec<Value>);

impl Message {
    pub fn new<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self(elements.into_iter().map(Into::into).collect())
    }

    pub fn elements(&self) -> &[Value] {
        &self.0
    }

    pub fn into_elements(self) -> Vec<Value> {
        self.0
    }

    /// Leading integer of the array, if any. Only used for log fields.
    pub fn type_code(&self) -> Option<u64> {
        self.0.first().and_then(Value::as_u64)
    }
}

impl From<Vec<Value>> for Message {
    fn from(elements: Vec<Value>) -> Self {
        Self(elements)
    }
}
