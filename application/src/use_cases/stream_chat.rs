//! Stream chat use case.
//!
//! Wraps a [`CompletionPort`] with the session cache: each invocation loads
//! the prior history for the chat id, extends it with the new turn, forwards
//! the full context to the completion call, re-streams the output to the
//! caller, and persists the updated history only once the stream is
//! exhausted.
//!
//! Failure semantics:
//! - the caller abandons the stream (drops the handle) → the turn is not
//!   persisted; prior history is unchanged
//! - the provider fails mid-stream → the error propagates as a terminal
//!   [`StreamEvent::Error`] and nothing is written
//!
//! Partial turns are never persisted.

use crate::ports::completion::{CompletionError, CompletionPort, StreamHandle};
use crate::ports::session_store::SessionStorePort;
use parley_domain::{Message, StreamEvent, TEMP_SESSION_ID};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Bounded hand-off between the provider stream and the caller. The caller
/// pulls fragments at its own pace; the only other buffering is the string
/// accumulation for the final assistant message.
const STREAM_BUFFER: usize = 32;

/// Input for the [`StreamChatUseCase`].
#[derive(Debug, Clone)]
pub struct StreamChatInput {
    /// Session to read and extend. `None` disables caching entirely.
    pub chat_id: Option<String>,
    /// The new turn(s), typically one user message (plus the system message
    /// when the session is fresh).
    pub messages: Vec<Message>,
}

impl StreamChatInput {
    pub fn new(chat_id: Option<String>, messages: Vec<Message>) -> Self {
        Self { chat_id, messages }
    }
}

/// Use case wrapping the completion call with the session cache.
///
/// Equivalent to the completion port itself when no chat id is supplied:
/// the call passes through unmodified with no history read or write.
pub struct StreamChatUseCase {
    completion: Arc<dyn CompletionPort>,
    store: Arc<dyn SessionStorePort>,
}

impl StreamChatUseCase {
    pub fn new(completion: Arc<dyn CompletionPort>, store: Arc<dyn SessionStorePort>) -> Self {
        Self { completion, store }
    }

    /// Run one completion turn through the cache.
    ///
    /// Returns a [`StreamHandle`] re-streaming the provider's fragments.
    /// The persisted history is trimmed by the store on write.
    pub async fn execute(&self, input: StreamChatInput) -> Result<StreamHandle, CompletionError> {
        // No session id or no new messages: no caching, no history I/O.
        let Some(chat_id) = input.chat_id else {
            return self.completion.stream(&input.messages).await;
        };
        if input.messages.is_empty() {
            return self.completion.stream(&input.messages).await;
        }

        let persist = chat_id != TEMP_SESSION_ID;
        let mut history = if persist {
            self.store.read(&chat_id).await
        } else {
            // The reserved id is invalidated before use and behaves as an
            // always-empty, non-persisting session.
            self.store.invalidate(&chat_id).await;
            Vec::new()
        };
        history.extend(input.messages);

        let mut inner = self.completion.stream(&history).await?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let mut accumulated = String::new();
            loop {
                let Some(event) = inner.receiver.recv().await else {
                    // Provider closed without a terminal event; the stream
                    // is exhausted and the turn still completes.
                    break;
                };
                match event {
                    StreamEvent::Delta(chunk) => {
                        accumulated.push_str(&chunk);
                        if tx.send(StreamEvent::Delta(chunk)).await.is_err() {
                            debug!("chat \"{}\": stream abandoned, turn discarded", chat_id);
                            return;
                        }
                    }
                    StreamEvent::Completed(text) => {
                        if accumulated.is_empty() {
                            accumulated = text;
                        }
                        break;
                    }
                    StreamEvent::Error(e) => {
                        let _ = tx.send(StreamEvent::Error(e)).await;
                        return;
                    }
                }
            }

            if tx.is_closed() {
                debug!("chat \"{}\": stream abandoned, turn discarded", chat_id);
                return;
            }

            if persist {
                history.push(Message::assistant(accumulated.clone()));
                if let Err(e) = store.write(&history, &chat_id).await {
                    warn!("chat \"{}\": history not persisted: {}", chat_id, e);
                }
            }

            // The terminal event is forwarded only after persistence, so a
            // caller that has seen Completed can immediately read the
            // updated history.
            let _ = tx.send(StreamEvent::Completed(accumulated)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}
