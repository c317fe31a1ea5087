//! Completion port
//!
//! Defines the interface for the streaming completion API.

use async_trait::async_trait;
use parley_domain::{Message, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur when talking to the completion API
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to the streaming completion API
///
/// This port defines how the application layer requests a completion for a
/// role-ordered message list. Implementations (adapters) live in the
/// infrastructure layer. Failures from the provider propagate untouched,
/// either as an `Err` here or as a terminal [`StreamEvent::Error`].
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Request a completion for `messages`, returning a lazy stream of
    /// output fragments.
    async fn stream(&self, messages: &[Message]) -> Result<StreamHandle, CompletionError>;
}

/// Handle for receiving streaming events from a completion.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream. Dropping the handle abandons the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Pull the next event, or `None` once the stream is exhausted.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    ///
    /// Useful when streaming display is not needed (e.g. quiet mode) but
    /// the transport still streams.
    pub async fn collect_text(mut self) -> Result<String, CompletionError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(CompletionError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collect_text_concatenates_deltas() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("hel".to_string())).await.unwrap();
        tx.send(StreamEvent::Delta("lo".to_string())).await.unwrap();
        tx.send(StreamEvent::Completed("hello".to_string()))
            .await
            .unwrap();

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn collect_text_uses_completed_when_no_deltas() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Completed("all at once".to_string()))
            .await
            .unwrap();

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "all at once");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_errors() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("par".to_string())).await.unwrap();
        tx.send(StreamEvent::Error("connection reset".to_string()))
            .await
            .unwrap();

        let err = StreamHandle::new(rx).collect_text().await.unwrap_err();
        assert!(matches!(err, CompletionError::RequestFailed(_)));
    }
}
