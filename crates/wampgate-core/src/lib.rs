//! wampgate core: transport-agnostic message primitives, codecs, and errors.
//!
//! This crate defines the contracts shared by the gateway and any embedding
//! router: the opaque [`Message`], the [`FrameKind`] a subprotocol is carried
//! on, and the [`Serializer`] capability with its JSON and MessagePack
//! implementations. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed payloads surface as `WampGateError` instead of crashing the
//! connection task that decoded them.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod codec;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, WampGateError};

pub use codec::{JsonSerializer, MsgpackSerializer, Serializer};
pub use protocol::{FrameKind, Message, Value, JSON_PROTOCOL, MSGPACK_PROTOCOL};
