//! # chatui-runtime
//!
//! Runtime pieces that plug into `chatui-core`'s provider abstraction.
//!
//! ## Providers
//!
//! - **Canned**: replies drawn from a static pool after a randomized delay
//!
//! ## Timers
//!
//! - **Tokio** (default feature): `tokio::time::sleep`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chatui_runtime::{CannedReplyProvider, TokioDelay};
//!
//! let provider = CannedReplyProvider::new(TokioDelay, ReplyConfig::default(), seed);
//! let reply = provider.reply("hello").await?;
//! ```

pub mod canned;

#[cfg(feature = "tokio")]
pub mod delay;

pub use canned::CannedReplyProvider;

#[cfg(feature = "tokio")]
pub use delay::TokioDelay;

// Re-export core types for convenience
pub use chatui_core::{ChatError, Delay, Reply, ReplyConfig, ReplyProvider, Result};
