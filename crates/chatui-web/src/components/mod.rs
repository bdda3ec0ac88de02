//! UI Components

mod history;
mod message;
mod snap_sheet;

pub use history::HistoryList;
pub use message::MessageBubble;
pub use snap_sheet::SnapSheet;
