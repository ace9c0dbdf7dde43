// File: src/error.rs
//! Error types for poem generation

use crate::core::types::Mode;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PoetError>;

#[derive(Error, Debug)]
pub enum PoetError {
    #[error("Invalid stanza shape: {0}")]
    InvalidShape(String),

    #[error("No word source available: supply a context text or a word service")]
    NoWordSource,

    #[error("{0} mode is unavailable: its word source was not supplied")]
    ModeUnavailable(Mode),

    #[error("Could not fill a line of {target} after {attempts} attempts")]
    Exhausted { attempts: usize, target: String },

    #[error("Word service error: {0}")]
    Service(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<bincode::Error> for PoetError {
    fn from(e: bincode::Error) -> Self {
        PoetError::Persistence(e.to_string())
    }
}
