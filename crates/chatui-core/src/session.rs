//! Chat State
//!
//! The active conversation plus the archived ones shown in the history
//! drawer. History lives only as long as the page does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Role, Turn, TurnId};

const TITLE_MAX_CHARS: usize = 40;

/// Unique conversation identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An archived conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: ConversationId,
    pub title: String,
    pub turns: Vec<Turn>,
    pub archived_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn preview(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant)
            .map(|t| t.content.as_str())
    }
}

/// Everything the chat screen renders
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    pub conversation_id: ConversationId,
    pub turns: Vec<Turn>,

    /// User turn awaiting a reply
    #[serde(default)]
    pub pending_reply: Option<TurnId>,

    /// Most recently archived first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    pub next_turn_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(ConversationId::new())
    }
}

impl ChatState {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            turns: Vec::new(),
            pending_reply: None,
            history: Vec::new(),
            next_turn_id: 1,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.pending_reply.is_some()
    }

    pub fn turn(&self, id: TurnId) -> Option<&Turn> {
        self.turns.iter().find(|t| t.id == id)
    }

    /// Title for the active conversation, derived from the first user turn
    pub fn title(&self) -> String {
        derive_title(&self.turns)
    }

    pub(crate) fn allocate_turn_id(&mut self) -> TurnId {
        let id = TurnId(self.next_turn_id);
        self.next_turn_id += 1;
        id
    }
}

pub(crate) fn derive_title(turns: &[Turn]) -> String {
    turns
        .iter()
        .find(|t| t.role == Role::User)
        .map(|t| {
            let preview: String = t.content.chars().take(TITLE_MAX_CHARS).collect();
            if t.content.chars().count() > TITLE_MAX_CHARS {
                format!("{}...", preview)
            } else {
                preview
            }
        })
        .unwrap_or_else(|| "New conversation".into())
}
