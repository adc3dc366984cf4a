use async_trait::async_trait;
use tokio::runtime::Handle;

use wampgate_core::error::{Result, WampGateError};
use wampgate_core::{FrameKind, Message};

/// Bound of every peer's inbound queue. A full queue blocks the producer.
pub const INBOUND_QUEUE_CAPACITY: usize = 10;

/// One message endpoint as seen by the router.
#[async_trait]
pub trait Peer: Send + Sync {
    /// Deliver a message to the remote end.
    async fn send(&self, msg: Message) -> Result<()>;

    /// Next inbound message, in arrival order. `None` once the peer is closed
    /// and everything queued before the close has been handed out.
    async fn receive(&self) -> Option<Message>;

    /// Close the peer. Safe to call any number of times.
    async fn close(&self);

    fn is_closed(&self) -> bool;

    /// Frame kind of the underlying connection, if it has one.
    fn frame_kind(&self) -> Option<FrameKind> {
        None
    }
}

/// Handle of the current Tokio runtime, or `Internal` when there is none.
pub fn runtime_handle() -> Result<Handle> {
    Handle::try_current().map_err(|e| WampGateError::Internal(format!("no tokio runtime: {e}")))
}
