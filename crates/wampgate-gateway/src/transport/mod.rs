//! Transport layer (WebSocket).
//!
//! Upgrade handling and subprotocol negotiation, the frame codec, and the
//! per-connection peer adapter with its read loop.

pub mod codec;
pub mod handshake;
pub mod peer;
pub mod read_loop;
pub mod ws;

pub use handshake::{negotiate, OriginPolicy, UpgradeRequest};
pub use peer::{ConnectionCloser, FrameSink, FrameStream, WebsocketPeer};
pub use read_loop::{DecodeErrorPolicy, ReadExit, ReadLoop};
