//! wampgate gateway library entry.
//!
//! Binds WebSocket connections to a message router: subprotocol registry,
//! upgrade and negotiation, the per-connection peer adapter and read loop, and
//! the server facade that ties them to the router. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod config;
pub mod registry;
pub mod router;
pub mod routing;
pub mod server;
pub mod transport;

pub use registry::{ProtocolEntry, ProtocolRegistry};
pub use routing::{BasicRouter, LocalClient, LocalPeer, Peer, Router};
pub use server::{WebsocketServer, WebsocketServerBuilder};
