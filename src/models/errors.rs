use thiserror::Error;

/// Game-specific error types
#[derive(Debug, Error)]
pub enum GameError {
    /// Input matched no command grammar
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    /// Command recognised but an argument failed parsing or range checks
    #[error("invalid value for {command}: {reason}")]
    InvalidCommandValue {
        command: &'static str,
        reason: String,
    },
    /// Valid command that cannot be carried out right now
    #[error("unable to comply: {0}")]
    UnableToComply(String),
    /// Settings were read or written before a location was chosen
    #[error("configuration location has not been set")]
    ConfigLocationUnset,
    #[error("malformed settings: {0}")]
    Settings(#[source] serde_json::Error),
    #[error("unreadable snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn invalid_value(command: &'static str, reason: impl Into<String>) -> Self {
        GameError::InvalidCommandValue {
            command,
            reason: reason.into(),
        }
    }

    pub fn unable(reason: impl Into<String>) -> Self {
        GameError::UnableToComply(reason.into())
    }

    /// Parse and value errors leave the simulation untouched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GameError::InvalidCommand(_) | GameError::InvalidCommandValue { .. }
        )
    }
}
