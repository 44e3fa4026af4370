//! Error type shared by every stage of the codec.
//!
//! Capacity errors (`Full`, `Empty`) mean a bounded container was sized wrong for the data it was
//! given. They cannot happen for trees built by this crate and are treated as internal errors.
//! `Corrupt` and `Truncated` describe bad compressed input. Nothing here is retried.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuffError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {what} is full (capacity {capacity})")]
    Full { what: &'static str, capacity: usize },

    #[error("Internal error: {what} is empty")]
    Empty { what: &'static str },

    #[error("Allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("Corrupt input: {0}")]
    Corrupt(String),

    #[error("Truncated input: expected {expected} bytes, produced {produced}")]
    Truncated { expected: u64, produced: u64 },
}

impl HuffError {
    /// Convenience constructor for format errors.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        HuffError::Corrupt(msg.into())
    }

    /// True for errors caused by bad compressed input rather than by the machine or the codec.
    pub fn is_format_error(&self) -> bool {
        matches!(self, HuffError::Corrupt(_) | HuffError::Truncated { .. })
    }

    /// The line shown to the user when a run fails.
    pub fn user_message(&self) -> String {
        if self.is_format_error() {
            format!("not a valid compressed file. {}", self)
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
