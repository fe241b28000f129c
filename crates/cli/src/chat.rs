//! The chat boundary.
//!
//! A backend receives the conversation as a JSON request body and answers
//! with a JSON response body:
//!
//! ```json
//! {"messages":[{"role":"user","content":"hi"}],"model":"offline"}
//! {"reply":"hello"}
//! ```
//!
//! Whatever goes wrong behind the boundary, [`Conversation::respond`] always
//! yields a reply for the user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::router::GameKind;

/// Shown to the user when the backend fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't come up with a reply just now. Please try again.";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Failures behind the chat boundary.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("chat backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed chat payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("chat request has no user message")]
    NoUserMessage,
}

/// Something that turns a JSON request body into a JSON response body.
pub trait ChatBackend {
    fn complete(&self, request_body: &str) -> Result<String, ChatError>;
}

/// Send `request` through `backend` and decode the reply.
pub fn exchange(backend: &dyn ChatBackend, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
    let body = serde_json::to_string(request)?;
    let raw = backend.complete(&body)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Like [`exchange`], but a failure becomes [`FALLBACK_REPLY`].
pub fn respond(backend: &dyn ChatBackend, request: &ChatRequest) -> ChatResponse {
    exchange(backend, request).unwrap_or_else(|err| {
        tracing::warn!(error = %err, model = %request.model, "chat backend failed");
        ChatResponse {
            reply: FALLBACK_REPLY.to_string(),
        }
    })
}

/// Ordered chat history for one terminal session.
#[derive(Clone, Debug)]
pub struct Conversation {
    model: String,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Record `text` from the user, ask the backend and record its reply.
    pub fn respond(&mut self, backend: &dyn ChatBackend, text: &str) -> ChatResponse {
        self.history.push(ChatMessage::user(text));
        let request = ChatRequest {
            messages: self.history.clone(),
            model: self.model.clone(),
        };
        let response = respond(backend, &request);
        self.history.push(ChatMessage::assistant(response.reply.clone()));
        response
    }
}

/// Built-in backend that answers locally without any transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineBackend;

impl OfflineBackend {
    fn reply_to(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        if ["hello", "hi", "hey", "こんにちは"].iter().any(|w| lower.starts_with(w)) {
            return "Hello! I'm running offline, but I'm always up for a game.".to_string();
        }
        if lower.contains("game") || lower.contains("play") || lower.contains("help") {
            return format!(
                "Type \"{}\" for three-mark tic-tac-toe or \"{}\" for 6x6 Othello. \
                 Type the same word again to leave the game.",
                GameKind::Tictactoe.triggers()[2],
                GameKind::Othello.triggers()[1],
            );
        }
        format!("You said: {}", text.trim())
    }
}

impl ChatBackend for OfflineBackend {
    fn complete(&self, request_body: &str) -> Result<String, ChatError> {
        let request: ChatRequest = serde_json::from_str(request_body)?;
        let last = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .ok_or(ChatError::NoUserMessage)?;
        let response = ChatResponse {
            reply: self.reply_to(&last.content),
        };
        Ok(serde_json::to_string(&response)?)
    }
}
