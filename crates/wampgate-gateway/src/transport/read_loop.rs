//! Per-connection read loop.
//!
//! Reads frames in order, decodes them with the connection's serializer and
//! pushes the messages into the peer's bounded inbound queue. A full queue
//! suspends the loop, which in turn stops reading from the socket.
//!
//! The loop ends when the connection ends (read error, end of stream, Close
//! frame), when the peer is closed elsewhere, when the queue's consumer is
//! gone, or on an undecodable frame under [`DecodeErrorPolicy::Close`]. In
//! every case the connection is closed through the shared closer before the
//! loop returns.

use std::sync::Arc;

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;

use wampgate_core::error::WampGateError;
use wampgate_core::{Message, Serializer};

use crate::transport::codec::{classify, Inbound};
use crate::transport::peer::{ConnectionCloser, FrameStream};

/// What to do with a frame whose payload fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeErrorPolicy {
    /// Close the connection.
    #[default]
    Close,
    /// Drop the frame (logged at warn) and keep reading.
    Skip,
}

/// Why a read loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadExit {
    /// End of stream or a Close frame from the remote end.
    ConnectionClosed,
    /// Transport-level read error.
    ReadFailed,
    /// Undecodable frame under [`DecodeErrorPolicy::Close`].
    DecodeFailed,
    /// The peer was closed locally.
    Shutdown,
    /// The inbound queue's receiver was dropped.
    ConsumerGone,
}

pub struct ReadLoop {
    stream: FrameStream,
    serializer: Arc<dyn Serializer>,
    queue: mpsc::Sender<Message>,
    closer: Arc<ConnectionCloser>,
    decode_policy: DecodeErrorPolicy,
}

impl ReadLoop {
    pub fn new(
        stream: FrameStream,
        serializer: Arc<dyn Serializer>,
        queue: mpsc::Sender<Message>,
        closer: Arc<ConnectionCloser>,
        decode_policy: DecodeErrorPolicy,
    ) -> Self {
        Self {
            stream,
            serializer,
            queue,
            closer,
            decode_policy,
        }
    }

    pub async fn run(mut self) -> ReadExit {
        let shutdown = self.closer.shutdown_token();

        let exit = loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break ReadExit::Shutdown,
                next = self.stream.next() => next,
            };

            let (kind, payload) = match next {
                None => break ReadExit::ConnectionClosed,
                Some(Err(e)) => {
                    let err = WampGateError::FrameReadFailure(e.to_string());
                    tracing::debug!(error = %err, code = err.code().as_str(), "read failed");
                    break ReadExit::ReadFailed;
                }
                Some(Ok(frame)) => match classify(frame) {
                    Inbound::Data { kind, payload } => (kind, payload),
                    Inbound::Control => continue,
                    Inbound::Close => break ReadExit::ConnectionClosed,
                },
            };

            let msg = match self.serializer.deserialize(&payload) {
                Ok(msg) => msg,
                Err(err) => match self.decode_policy {
                    DecodeErrorPolicy::Skip => {
                        tracing::warn!(error = %err, frame_kind = %kind, bytes = payload.len(), "dropping undecodable frame");
                        continue;
                    }
                    DecodeErrorPolicy::Close => {
                        tracing::warn!(error = %err, frame_kind = %kind, bytes = payload.len(), "closing on undecodable frame");
                        break ReadExit::DecodeFailed;
                    }
                },
            };

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break ReadExit::Shutdown,
                sent = self.queue.send(msg) => {
                    if sent.is_err() {
                        break ReadExit::ConsumerGone;
                    }
                }
            }
        };

        self.closer.close().await;
        exit
    }
}
