//! Result publishing
//!
//! Delivery is at-most-once: a failed publish is reported to the caller, which
//! logs it. Nothing here retries.

use crate::error::{Result, ServiceError};
use crate::messages::OutboundMessage;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Sink for outbound messages
#[async_trait]
pub trait ResultPublisher: Send + Sync {
    async fn publish(&self, message: &OutboundMessage) -> Result<()>;
}

/// Publishes into an in-process channel
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelPublisher {
    pub fn new(sender: mpsc::UnboundedSender<OutboundMessage>) -> Self {
        Self { sender }
    }

    /// Publisher plus the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl ResultPublisher for ChannelPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        self.sender
            .send(message.clone())
            .map_err(|_| ServiceError::transport("outbound channel closed"))
    }
}

/// Writes each message as one line of JSON
pub struct LinePublisher<W> {
    writer: Mutex<W>,
}

impl<W> LinePublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl LinePublisher<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> ResultPublisher for LinePublisher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;

        debug!("Published {} ({} bytes)", message.kind(), line.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_publisher() {
        let (publisher, mut receiver) = ChannelPublisher::channel();
        let message = OutboundMessage::optimization_error("fan-1", "nope");

        publisher.publish(&message).await.unwrap();
        assert_eq!(receiver.recv().await.unwrap(), message);
    }

    #[tokio::test]
    async fn test_channel_publisher_closed() {
        let (publisher, receiver) = ChannelPublisher::channel();
        drop(receiver);

        let err = publisher
            .publish(&OutboundMessage::optimization_error("fan-1", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_line_publisher_writes_json_lines() {
        let publisher = LinePublisher::new(Vec::new());
        publisher.publish(&OutboundMessage::optimization_error("fan-1", "a")).await.unwrap();
        publisher.publish(&OutboundMessage::optimization_error("fan-2", "b")).await.unwrap();

        let output = String::from_utf8(publisher.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: OutboundMessage = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.kind(), "optimizationError");
    }
}
