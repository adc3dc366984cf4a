use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use wampgate_core::error::Result;
use wampgate_core::Message;

use super::peer::{runtime_handle, Peer, INBOUND_QUEUE_CAPACITY};

/// Client-side wrapper around a peer handed out by the router.
///
/// A background task drains the peer into the client's own inbox, so the
/// router side never stalls on a client that is busy sending.
pub struct LocalClient {
    peer: Arc<dyn Peer>,
    inbox: mpsc::Receiver<Message>,
    receiver: JoinHandle<()>,
}

impl LocalClient {
    /// Wrap `peer` and start its receive loop. Fails outside a Tokio runtime.
    pub fn new(peer: Arc<dyn Peer>) -> Result<Self> {
        let handle = runtime_handle()?;
        let (tx, inbox) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let source = Arc::clone(&peer);
        let receiver = handle.spawn(async move {
            while let Some(msg) = source.receive().await {
                if tx.send(msg).await.is_err() {
                    break;
                }
            }
            tracing::debug!("local client receive loop finished");
        });
        Ok(Self {
            peer,
            inbox,
            receiver,
        })
    }

    pub async fn send(&self, msg: Message) -> Result<()> {
        self.peer.send(msg).await
    }

    pub async fn next_message(&mut self) -> Option<Message> {
        self.inbox.recv().await
    }

    pub async fn close(&self) {
        self.peer.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.peer.is_closed()
    }
}

impl Drop for LocalClient {
    fn drop(&mut self) {
        self.receiver.abort();
    }
}
