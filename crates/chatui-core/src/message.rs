//! Conversation Turns
//!
//! Display-level message types: bubbles, suggestion chips and detail cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Feedback left on an assistant turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    #[default]
    None,
    Up,
    Down,
}

impl Vote {
    /// Pressing the active vote clears it, pressing the other one switches
    pub fn toggle(self, pressed: Vote) -> Vote {
        if self == pressed { Vote::None } else { pressed }
    }
}

/// Turn identifier, unique within a [`crate::session::ChatState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(pub u64);

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Collapsible card attached to an assistant reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Details {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }
}

/// A single bubble in the conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,

    /// Follow-up prompts rendered as chips
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,

    #[serde(default)]
    pub details_expanded: bool,

    #[serde(default)]
    pub vote: Vote,

    /// Set when the turn reports a failed reply
    #[serde(default)]
    pub failed: bool,

    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(id: TurnId, role: Role, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            suggestions: Vec::new(),
            details: None,
            details_expanded: false,
            vote: Vote::None,
            failed: false,
            at,
        }
    }

    pub fn user(id: TurnId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(id, Role::User, content, at)
    }

    pub fn assistant(id: TurnId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(id, Role::Assistant, content, at)
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_details(mut self, details: Option<Details>) -> Self {
        self.details = details;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
