//! WebSocket peer adapter.
//!
//! Bridges one upgraded connection to the router's [`Peer`] capability. The
//! inbound half belongs to a spawned [`ReadLoop`]; the outbound half is shared
//! between [`Peer::send`] and the [`ConnectionCloser`].

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use wampgate_core::error::{Result, WampGateError};
use wampgate_core::{FrameKind, Message, Serializer};

use crate::registry::ProtocolEntry;
use crate::routing::{Peer, INBOUND_QUEUE_CAPACITY};
use crate::transport::codec::encode_frame;
use crate::transport::read_loop::{DecodeErrorPolicy, ReadLoop};

/// Outbound half of a connection.
pub type FrameSink = Pin<Box<dyn Sink<WsMessage, Error = axum::Error> + Send>>;
/// Inbound half of a connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = std::result::Result<WsMessage, axum::Error>> + Send>>;

/// The one close path of a connection.
///
/// The first `close` sends a Close frame, releases the sink and stops the read
/// loop; every later call returns `false` without touching the connection.
pub struct ConnectionCloser {
    sink: Mutex<FrameSink>,
    closed: AtomicBool,
    shutdown: CancellationToken,
}

impl ConnectionCloser {
    pub fn new(sink: FrameSink) -> Self {
        Self {
            sink: Mutex::new(sink),
            closed: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    pub async fn send_frame(&self, frame: WsMessage) -> Result<()> {
        if self.is_closed() {
            return Err(WampGateError::ConnectionClosed);
        }
        let mut sink = self.sink.lock().await;
        sink.send(frame).await.map_err(|e| {
            tracing::debug!(error = %e, "frame write failed");
            WampGateError::ConnectionClosed
        })
    }

    /// Returns `true` only for the call that actually closed the connection.
    pub async fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.shutdown.cancel();

        let mut sink = self.sink.lock().await;
        // the remote end may already be gone
        let _ = sink.send(WsMessage::Close(None)).await;
        let _ = sink.close().await;
        tracing::debug!("connection closed");
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Resolves once the connection has been closed.
    pub async fn closed(&self) {
        self.shutdown.cancelled().await
    }
}

pub struct WebsocketPeer {
    protocol: String,
    frame_kind: FrameKind,
    serializer: Arc<dyn Serializer>,
    closer: Arc<ConnectionCloser>,
    inbound: Mutex<mpsc::Receiver<Message>>,
}

impl WebsocketPeer {
    /// Build the adapter for an upgraded socket and start its read loop.
    pub fn from_socket(socket: WebSocket, entry: ProtocolEntry, decode_policy: DecodeErrorPolicy) -> Self {
        let (sink, stream) = socket.split();
        Self::spawn(Box::pin(sink), Box::pin(stream), entry, decode_policy)
    }

    pub fn spawn(
        sink: FrameSink,
        stream: FrameStream,
        entry: ProtocolEntry,
        decode_policy: DecodeErrorPolicy,
    ) -> Self {
        let (tx, rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
        let closer = Arc::new(ConnectionCloser::new(sink));

        let read_loop = ReadLoop::new(
            stream,
            Arc::clone(&entry.serializer),
            tx,
            Arc::clone(&closer),
            decode_policy,
        );
        let span = tracing::info_span!("peer", protocol = %entry.token, frame_kind = %entry.frame_kind);
        tokio::spawn(
            async move {
                let exit = read_loop.run().await;
                tracing::debug!(?exit, "read loop finished");
            }
            .instrument(span),
        );

        Self {
            protocol: entry.token,
            frame_kind: entry.frame_kind,
            serializer: entry.serializer,
            closer,
            inbound: Mutex::new(rx),
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Resolves once the connection has been closed, from either side.
    pub async fn closed(&self) {
        self.closer.closed().await
    }
}

#[async_trait]
impl Peer for WebsocketPeer {
    async fn send(&self, msg: Message) -> Result<()> {
        let payload = self.serializer.serialize(&msg)?;
        let frame = encode_frame(self.frame_kind, self.serializer.name(), payload)?;
        self.closer.send_frame(frame).await
    }

    async fn receive(&self) -> Option<Message> {
        self.inbound.lock().await.recv().await
    }

    async fn close(&self) {
        self.closer.close().await;
    }

    fn is_closed(&self) -> bool {
        self.closer.is_closed()
    }

    fn frame_kind(&self) -> Option<FrameKind> {
        Some(self.frame_kind)
    }
}
