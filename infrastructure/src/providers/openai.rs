//! Streaming completion adapter for OpenAI-compatible endpoints.
//!
//! Sends the role-ordered message list to `{api_base}/chat/completions`
//! with `stream: true` and bridges the SSE response to [`StreamEvent`]s
//! over an mpsc channel. Provider failures are forwarded untouched, either
//! as a request error or as a terminal [`StreamEvent::Error`].

use async_trait::async_trait;
use futures::StreamExt;
use parley_application::ports::completion::{CompletionError, CompletionPort, StreamHandle};
use parley_domain::{Message, StreamEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

const STREAM_BUFFER: usize = 32;

/// Completion client for an OpenAI-compatible chat completion API.
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompletion {
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            model: model.into(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ChunkDelta {
    content: Option<String>,
}

enum SsePayload {
    Delta(String),
    Done,
}

/// Parse one SSE line. Non-data lines, keep-alives and role-only deltas
/// yield `None`.
fn parse_data_line(line: &str) -> Option<SsePayload> {
    let data = line.strip_prefix("data:")?.trim();
    if data == "[DONE]" {
        return Some(SsePayload::Done);
    }
    let chunk: ChatChunk = serde_json::from_str(data).ok()?;
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .map(SsePayload::Delta)
}

#[async_trait]
impl CompletionPort for OpenAiCompletion {
    async fn stream(&self, messages: &[Message]) -> Result<StreamHandle, CompletionError> {
        debug!(
            "requesting completion from {} ({} message(s))",
            self.endpoint(),
            messages.len()
        );

        let mut request = self.client.post(self.endpoint()).json(&ChatRequest {
            model: &self.model,
            messages,
            stream: true,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CompletionError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::RequestFailed(format!(
                "{status}: {body}"
            )));
        }

        let mut byte_stream = response.bytes_stream();
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(async move {
            let mut buffer = String::new();
            let mut full_text = String::new();
            while let Some(chunk) = byte_stream.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&bytes));
                while let Some(newline) = buffer.find('\n') {
                    let line: String = buffer.drain(..=newline).collect();
                    match parse_data_line(line.trim()) {
                        Some(SsePayload::Delta(text)) => {
                            full_text.push_str(&text);
                            if tx.send(StreamEvent::Delta(text)).await.is_err() {
                                return;
                            }
                        }
                        Some(SsePayload::Done) => {
                            let _ = tx.send(StreamEvent::Completed(full_text)).await;
                            return;
                        }
                        None => {}
                    }
                }
            }
            // Connection closed without [DONE]; treat as end of stream.
            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#;
        match parse_data_line(line) {
            Some(SsePayload::Delta(text)) => assert_eq!(text, "Hel"),
            _ => panic!("expected a delta"),
        }
    }

    #[test]
    fn parses_done_marker() {
        assert!(matches!(
            parse_data_line("data: [DONE]"),
            Some(SsePayload::Done)
        ));
    }

    #[test]
    fn skips_role_only_delta() {
        let line = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert!(parse_data_line(line).is_none());
    }

    #[test]
    fn skips_non_data_lines() {
        assert!(parse_data_line("").is_none());
        assert!(parse_data_line(": keep-alive").is_none());
        assert!(parse_data_line("event: ping").is_none());
    }

    #[test]
    fn request_body_uses_lowercase_roles() {
        let messages = vec![Message::system("persona"), Message::user("hi")];
        let body = serde_json::to_value(ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            stream: true,
        })
        .unwrap();

        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
    }
}
