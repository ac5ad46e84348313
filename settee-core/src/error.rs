use thiserror::Error;

use crate::config::ConfigLoadError;

#[derive(Error, Debug)]
pub enum SetteeError {
    #[error("failed to read '{key}': {reason}")]
    PersistenceRead { key: String, reason: String },

    #[error("failed to write '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    #[error("playback source error: {0}")]
    PlaybackSource(String),

    #[error("'{intent}' is not valid while {state}")]
    InvalidTransition {
        state: &'static str,
        intent: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

impl SetteeError {
    pub fn read(key: impl Into<String>, reason: impl ToString) -> Self {
        SetteeError::PersistenceRead {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: impl Into<String>, reason: impl ToString) -> Self {
        SetteeError::PersistenceWrite {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetteeError>;
