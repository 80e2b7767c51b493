//! Error types for Reckon
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The only lifecycle error is [`Error::InvalidState`]: a mutation attempted on
//! a completed trace. It is a sequencing bug in the caller and is never
//! retried. The remaining variants belong to the edges (JSON documents, files,
//! command-line input).

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for Reckon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Mutating trace operations, named in [`Error::InvalidState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Appending a step
    AddStep,
    /// Setting the final result
    SetResult,
    /// Adding trace-level metadata
    AddMetadata,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::AddStep => f.write_str("add step"),
            Mutation::SetResult => f.write_str("set result"),
            Mutation::AddMetadata => f.write_str("add metadata"),
        }
    }
}

/// Error types for Reckon
#[derive(Debug, Error)]
pub enum Error {
    /// Mutation attempted on a completed trace
    #[error("Invalid state: cannot {operation} on completed trace '{trace_id}'")]
    InvalidState {
        /// The rejected operation
        operation: Mutation,
        /// Identifier of the completed trace
        trace_id: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (reading or writing documents and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed user input (config values, command-line arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an InvalidInput error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Check whether this is the lifecycle error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::InvalidState { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
