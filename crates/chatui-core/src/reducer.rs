//! Conversation Reducer
//!
//! All chat state changes go through [`reduce`], which takes the previous
//! state by reference and returns the next one. The input is never touched,
//! so every transition can be logged, replayed and tested on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{Role, Turn, TurnId, Vote};
use crate::provider::Reply;
use crate::session::{derive_title, ChatState, ConversationId, HistoryEntry};

/// Everything that can happen to a [`ChatState`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatAction {
    Submit {
        text: String,
        at: DateTime<Utc>,
    },
    ChooseSuggestion {
        text: String,
        at: DateTime<Utc>,
    },
    ReplyArrived {
        for_turn: TurnId,
        reply: Reply,
        at: DateTime<Utc>,
    },
    ReplyFailed {
        for_turn: TurnId,
        message: String,
        at: DateTime<Utc>,
    },
    ToggleVote {
        turn: TurnId,
        vote: Vote,
    },
    ToggleDetails {
        turn: TurnId,
    },
    NewConversation {
        id: ConversationId,
        at: DateTime<Utc>,
    },
    RestoreConversation {
        id: ConversationId,
        at: DateTime<Utc>,
    },
    DeleteHistory {
        id: ConversationId,
    },
}

impl ChatAction {
    pub fn name(&self) -> &'static str {
        match self {
            ChatAction::Submit { .. } => "submit",
            ChatAction::ChooseSuggestion { .. } => "choose_suggestion",
            ChatAction::ReplyArrived { .. } => "reply_arrived",
            ChatAction::ReplyFailed { .. } => "reply_failed",
            ChatAction::ToggleVote { .. } => "toggle_vote",
            ChatAction::ToggleDetails { .. } => "toggle_details",
            ChatAction::NewConversation { .. } => "new_conversation",
            ChatAction::RestoreConversation { .. } => "restore_conversation",
            ChatAction::DeleteHistory { .. } => "delete_history",
        }
    }
}

/// Apply an action and return the resulting state
pub fn reduce(state: &ChatState, action: ChatAction) -> ChatState {
    let mut next = state.clone();
    tracing::debug!(action = action.name(), conversation = %state.conversation_id, "reduce");

    match action {
        ChatAction::Submit { text, at } | ChatAction::ChooseSuggestion { text, at } => {
            let text = text.trim();
            if text.is_empty() || next.is_waiting() {
                return next;
            }
            let id = next.allocate_turn_id();
            next.turns.push(Turn::user(id, text, at));
            next.pending_reply = Some(id);
        }

        ChatAction::ReplyArrived { for_turn, reply, at } => {
            if next.pending_reply != Some(for_turn) {
                tracing::debug!(turn = %for_turn, "dropping stale reply");
                return next;
            }
            let id = next.allocate_turn_id();
            next.turns.push(
                Turn::assistant(id, reply.content, at)
                    .with_suggestions(reply.suggestions)
                    .with_details(reply.details),
            );
            next.pending_reply = None;
        }

        ChatAction::ReplyFailed { for_turn, message, at } => {
            if next.pending_reply != Some(for_turn) {
                return next;
            }
            let id = next.allocate_turn_id();
            let mut turn = Turn::assistant(id, message, at);
            turn.failed = true;
            next.turns.push(turn);
            next.pending_reply = None;
        }

        ChatAction::ToggleVote { turn, vote } => {
            if let Some(t) = next
                .turns
                .iter_mut()
                .find(|t| t.id == turn && t.role == Role::Assistant && !t.failed)
            {
                t.vote = t.vote.toggle(vote);
            }
        }

        ChatAction::ToggleDetails { turn } => {
            if let Some(t) = next
                .turns
                .iter_mut()
                .find(|t| t.id == turn && t.details.is_some())
            {
                t.details_expanded = !t.details_expanded;
            }
        }

        ChatAction::NewConversation { id, at } => {
            archive_active(&mut next, at);
            next.conversation_id = id;
        }

        ChatAction::RestoreConversation { id, at } => {
            let Some(pos) = next.history.iter().position(|h| h.id == id) else {
                return next;
            };
            let entry = next.history.remove(pos);
            archive_active(&mut next, at);
            next.conversation_id = entry.id;
            next.turns = entry.turns;
        }

        ChatAction::DeleteHistory { id } => {
            next.history.retain(|h| h.id != id);
        }
    }

    next
}

/// Move the active turns into history (if any) and clear the pending reply
fn archive_active(state: &mut ChatState, at: DateTime<Utc>) {
    state.pending_reply = None;
    if state.turns.is_empty() {
        return;
    }
    let turns = std::mem::take(&mut state.turns);
    state.history.insert(
        0,
        HistoryEntry {
            id: state.conversation_id.clone(),
            title: derive_title(&turns),
            turns,
            archived_at: at,
        },
    );
}
