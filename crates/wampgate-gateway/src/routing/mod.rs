//! Router-facing abstractions.
//!
//! The [`Peer`] capability is what a router talks to, whether the other end
//! is a WebSocket connection or an in-process client. [`BasicRouter`] is a
//! minimal realm-tracking router used by the binary and tests; a full
//! pub/sub + RPC router plugs in through the [`Router`] trait.

mod client;
mod local;
mod peer;
mod router;

pub use client::LocalClient;
pub use local::LocalPeer;
pub use peer::{runtime_handle, Peer, INBOUND_QUEUE_CAPACITY};
pub use router::{BasicRouter, Router};
