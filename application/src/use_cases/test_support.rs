//! Scripted gateway and sleeper shared by the use case tests.

use crate::ports::clock::Sleeper;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle};
use crate::ports::progress::DebateProgressNotifier;
use async_trait::async_trait;
use debate_domain::{Message, Model, Persona, StreamEvent, TurnMessage, Verdict};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One scripted answer, consumed by the next `send`/`send_streaming` call
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Chunks(Vec<String>),
    /// Fails at request time
    Fail(String),
    /// Streams a delta, then a stream-level error
    StreamError(String),
    /// Never resolves
    Hang,
    /// Cancels the token, then answers
    CancelThen(CancellationToken, String),
    /// Cancels the token while the request is pending, then never resolves
    CancelThenHang(CancellationToken),
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }

    pub fn fail(s: &str) -> Self {
        Reply::Fail(s.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: Model,
    pub history: Vec<Message>,
    pub prompt: String,
}

#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    default_reply: Option<String>,
}

/// Gateway whose sessions answer from a shared FIFO of replies
pub struct ScriptedGateway {
    script: Arc<Script>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            script: Arc::new(Script {
                replies: Mutex::new(replies.into()),
                ..Script::default()
            }),
        }
    }

    /// Answers `reply` once the script runs out
    pub fn answering(reply: &str) -> Self {
        Self::with_default(Vec::new(), reply)
    }

    pub fn with_default(replies: Vec<Reply>, default_reply: &str) -> Self {
        Self {
            script: Arc::new(Script {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                default_reply: Some(default_reply.to_string()),
            }),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_history(
        &self,
        model: &Model,
        history: Vec<Message>,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            history,
            script: Arc::clone(&self.script),
        }))
    }
}

struct ScriptedSession {
    model: Model,
    history: Vec<Message>,
    script: Arc<Script>,
}

impl ScriptedSession {
    fn next_reply(&self, prompt: &str) -> Reply {
        self.script.calls.lock().unwrap().push(RecordedCall {
            model: self.model.clone(),
            history: self.history.clone(),
            prompt: prompt.to_string(),
        });
        let next = self.script.replies.lock().unwrap().pop_front();
        match (next, &self.script.default_reply) {
            (Some(reply), _) => reply,
            (None, Some(default)) => Reply::Text(default.clone()),
            (None, None) => Reply::Fail("script exhausted".to_string()),
        }
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        match self.next_reply(content) {
            Reply::Text(text) => Ok(text),
            Reply::Chunks(chunks) => Ok(chunks.concat()),
            Reply::Fail(msg) | Reply::StreamError(msg) => Err(GatewayError::RequestFailed(msg)),
            Reply::Hang => std::future::pending().await,
            Reply::CancelThen(token, text) => {
                token.cancel();
                Ok(text)
            }
            Reply::CancelThenHang(token) => {
                token.cancel();
                std::future::pending().await
            }
        }
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let events = match self.next_reply(content) {
            Reply::Text(text) => vec![StreamEvent::Delta(text), StreamEvent::Completed(String::new())],
            Reply::Chunks(chunks) => chunks
                .into_iter()
                .map(StreamEvent::Delta)
                .chain(std::iter::once(StreamEvent::Completed(String::new())))
                .collect(),
            Reply::Fail(msg) => return Err(GatewayError::RequestFailed(msg)),
            Reply::StreamError(msg) => {
                vec![StreamEvent::Delta("partial".into()), StreamEvent::Error(msg)]
            }
            Reply::Hang => std::future::pending().await,
            Reply::CancelThen(token, text) => {
                token.cancel();
                vec![StreamEvent::Delta(text), StreamEvent::Completed(String::new())]
            }
            Reply::CancelThenHang(token) => {
                token.cancel();
                std::future::pending().await
            }
        };
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            let _ = tx.send(event).await;
        }
        Ok(StreamHandle::new(rx))
    }
}

/// Sleeper that records requested durations and returns immediately
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// Progress notifier that records what it was told
#[derive(Default)]
pub struct RecordingProgress {
    pub appended: Mutex<Vec<TurnMessage>>,
    pub chunks: Mutex<Vec<String>>,
    pub retries: Mutex<Vec<(String, usize)>>,
    pub verdicts: Mutex<Vec<String>>,
}

impl DebateProgressNotifier for RecordingProgress {
    fn on_turn_chunk(&self, _persona: &Persona, chunk: &str) {
        self.chunks.lock().unwrap().push(chunk.to_string());
    }

    fn on_turn_retry(&self, persona: &Persona, attempt: usize, _reason: &str) {
        self.retries
            .lock()
            .unwrap()
            .push((persona.name().to_string(), attempt));
    }

    fn on_message_appended(&self, message: &TurnMessage) {
        self.appended.lock().unwrap().push(message.clone());
    }

    fn on_verdict(&self, verdict: &Verdict) {
        self.verdicts
            .lock()
            .unwrap()
            .push(verdict.content().to_string());
    }
}
