//! Reply Provider Strategy
//!
//! The chat screen asks a [`ReplyProvider`] for the assistant's answer and
//! never cares how long it takes or where it comes from. Latency is an
//! injected [`Delay`] so the same provider runs on tokio natively and on the
//! browser's timer in WASM.
//!
//! Futures are `?Send`: browser timers are not `Send`, and the UI drives
//! everything from a single thread anyway.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::{AbortHandle, Abortable, FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::message::{Details, TurnId};
use crate::reducer::ChatAction;

/// Assistant reply payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,

    #[serde(default)]
    pub suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            suggestions: Vec::new(),
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }
}

/// Strategy trait for reply sources
#[async_trait(?Send)]
pub trait ReplyProvider: Send + Sync {
    /// Produce a reply for the prompt, possibly after some latency
    async fn reply(&self, prompt: &str) -> Result<Reply>;

    /// Human-readable provider name
    fn name(&self) -> &str;
}

/// Timer capability used to simulate latency
#[async_trait(?Send)]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Delay that resolves immediately
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait(?Send)]
impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

/// Deterministic provider that replays queued replies in order
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Reply>>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
        }
    }

    /// Queue a failure to be returned in turn
    pub fn push_error(&self, error: ChatError) {
        self.queue().push_back(Err(error));
    }

    pub fn push(&self, reply: Reply) {
        self.queue().push_back(Ok(reply));
    }

    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Reply>>> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait(?Send)]
impl ReplyProvider for ScriptedProvider {
    async fn reply(&self, prompt: &str) -> Result<Reply> {
        if prompt.trim().is_empty() {
            return Err(ChatError::EmptyPrompt);
        }
        self.queue().pop_front().unwrap_or(Err(ChatError::ScriptExhausted))
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

/// Ask `provider` for a reply to the pending user turn.
///
/// The returned future resolves to the action to feed back into the reducer,
/// or `None` if the request was aborted through the handle. Hosts keep the
/// handle and abort it when the page goes away so a disposed view is never
/// updated.
pub fn request_reply(
    provider: Arc<dyn ReplyProvider>,
    for_turn: TurnId,
    prompt: String,
) -> (LocalBoxFuture<'static, Option<ChatAction>>, AbortHandle) {
    let (handle, registration) = AbortHandle::new_pair();
    let work = async move {
        tracing::info!(provider = provider.name(), turn = %for_turn, "requesting reply");
        match provider.reply(&prompt).await {
            Ok(reply) => ChatAction::ReplyArrived {
                for_turn,
                reply,
                at: Utc::now(),
            },
            Err(err) => {
                tracing::warn!(provider = provider.name(), error = %err, "reply failed");
                ChatAction::ReplyFailed {
                    for_turn,
                    message: err.user_message(),
                    at: Utc::now(),
                }
            }
        }
    };
    let future = Abortable::new(work, registration).map(|outcome| outcome.ok());
    (future.boxed_local(), handle)
}
