//! # chatui-core
//!
//! Framework-agnostic logic behind the chatui front-end.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        Chat screen                            │
//! │  ┌──────────────┐  ┌─────────────────┐  ┌──────────────────┐  │
//! │  │  SnapPanel   │  │ ChatState +     │  │  ReplyProvider   │  │
//! │  │  (gestures)  │  │ reduce(action)  │──│  (Strategy)      │  │
//! │  └──────────────┘  └─────────────────┘  └──────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The panel decides *where* the history drawer sits, the reducer decides
//! *what* the conversation contains, and the provider decides *how* replies
//! are produced. None of them know about the DOM.

pub mod config;
pub mod error;
pub mod message;
pub mod panel;
pub mod provider;
pub mod reducer;
pub mod session;

pub use config::{ChatConfig, PanelConfig, ReplyConfig, SHEET_SHADOW_EXTENT_PX};
pub use error::{ChatError, Result};
pub use message::{Details, Role, Turn, TurnId, Vote};
pub use panel::{Frame, Metrics, PanelState, SnapPanel};
pub use provider::{request_reply, Delay, NoDelay, Reply, ReplyProvider, ScriptedProvider};
pub use reducer::{reduce, ChatAction};
pub use session::{ChatState, ConversationId, HistoryEntry};
