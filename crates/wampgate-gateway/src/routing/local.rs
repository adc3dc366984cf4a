use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use wampgate_core::error::{Result, WampGateError};
use wampgate_core::Message;

use super::peer::{Peer, INBOUND_QUEUE_CAPACITY};

/// In-process peer. Created in back-to-back pairs: whatever one end sends,
/// the other end receives. No framing or serialization is involved.
pub struct LocalPeer {
    outgoing: mpsc::Sender<Message>,
    incoming: Mutex<mpsc::Receiver<Message>>,
    // shared by both ends
    closed: CancellationToken,
}

impl LocalPeer {
    pub fn pair() -> (LocalPeer, LocalPeer) {
        let (a_tx, a_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let (b_tx, b_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let closed = CancellationToken::new();
        let a = LocalPeer {
            outgoing: b_tx,
            incoming: Mutex::new(a_rx),
            closed: closed.clone(),
        };
        let b = LocalPeer {
            outgoing: a_tx,
            incoming: Mutex::new(b_rx),
            closed,
        };
        (a, b)
    }
}

#[async_trait]
impl Peer for LocalPeer {
    async fn send(&self, msg: Message) -> Result<()> {
        if self.closed.is_cancelled() {
            return Err(WampGateError::ConnectionClosed);
        }
        tokio::select! {
            res = self.outgoing.send(msg) => res.map_err(|_| WampGateError::ConnectionClosed),
            _ = self.closed.cancelled() => Err(WampGateError::ConnectionClosed),
        }
    }

    async fn receive(&self) -> Option<Message> {
        let mut incoming = self.incoming.lock().await;
        tokio::select! {
            biased;
            msg = incoming.recv() => return msg,
            _ = self.closed.cancelled() => {}
        }
        incoming.try_recv().ok()
    }

    async fn close(&self) {
        self.closed.cancel();
    }

    fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}
