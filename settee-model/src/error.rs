use std::fmt::{self, Display};

/// Errors produced by model constructors and decoding routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidCheckpoint(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidCheckpoint(msg) => {
                write!(f, "invalid checkpoint: {msg}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
