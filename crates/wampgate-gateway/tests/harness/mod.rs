//! In-memory connection halves shared by transport tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::Message as WsMessage;
use futures_util::StreamExt;
use tokio::sync::mpsc;

use wampgate_gateway::transport::{FrameSink, FrameStream};

pub type FrameFeed = mpsc::UnboundedSender<Result<WsMessage, axum::Error>>;

/// Stream fed by the returned sender; ends when the sender is dropped.
pub fn frame_stream() -> (FrameFeed, FrameStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    });
    (tx, Box::pin(stream))
}

/// Like [`frame_stream`], also counting frames pulled by the reader.
pub fn counted_frame_stream() -> (FrameFeed, FrameStream, Arc<AtomicUsize>) {
    let (tx, stream) = frame_stream();
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulled);
    let stream = stream.inspect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (tx, Box::pin(stream), pulled)
}

/// Sink recording every frame written to it.
pub fn recording_sink() -> (FrameSink, mpsc::UnboundedReceiver<WsMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = futures_util::sink::unfold(tx, |tx, frame: WsMessage| async move {
        tx.send(frame).map_err(axum::Error::new)?;
        Ok::<_, axum::Error>(tx)
    });
    (Box::pin(sink), rx)
}

pub fn read_error() -> axum::Error {
    axum::Error::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
}

pub fn text(s: &str) -> Result<WsMessage, axum::Error> {
    Ok(WsMessage::Text(s.to_string()))
}

/// Everything recorded so far, without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<WsMessage>) -> Vec<WsMessage> {
    let mut out = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        out.push(frame);
    }
    out
}

pub fn close_frames(frames: &[WsMessage]) -> usize {
    frames
        .iter()
        .filter(|f| matches!(f, WsMessage::Close(_)))
        .count()
}
