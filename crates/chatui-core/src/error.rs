//! Error Types

use thiserror::Error;

/// Result type alias for chatui operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Reply provider failed to produce a reply
    #[error("Provider error: {0}")]
    Provider(String),

    /// Prompt was empty after trimming
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Scripted provider ran out of queued replies
    #[error("No scripted replies left")]
    ScriptExhausted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Convert to the text shown in a failed assistant turn
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Provider(msg) => format!("The assistant ran into a problem: {}", msg),
            ChatError::EmptyPrompt => "Type a message first.".into(),
            ChatError::ScriptExhausted => "The assistant has nothing more to say right now.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_internals() {
        let err = ChatError::Config("damping out of range".into());
        assert_eq!(err.user_message(), "An unexpected error occurred.");

        let err = ChatError::Provider("timeout".into());
        assert_eq!(err.user_message(), "The assistant ran into a problem: timeout");
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: ChatError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ChatError::Other(ref m) if m == "boom"));
    }
}
