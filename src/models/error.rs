// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error taxonomy shared by the poll model, storage, and registry.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by poll operations.
#[derive(Debug, Error)]
pub enum PollError {
    /// User input violated a poll invariant (empty name, duplicate label, ...).
    #[error("{0}")]
    Validation(String),

    #[error("A poll named '{0}' already exists.")]
    DuplicateName(String),

    #[error("Poll '{0}' not found.")]
    NotFound(String),

    #[error("Poll '{poll}' has no choice '{choice}'.")]
    InvalidChoice { poll: String, choice: String },

    #[error("Poll '{poll}' is closed: it reached the limit of {limit} votes.")]
    PollClosed { poll: String, limit: u64 },

    #[error("Failed to access poll file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read or write CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// A single stored row could not be turned into a poll.
    #[error("Malformed poll row on line {line}: {reason}")]
    Parse { line: u64, reason: String },
}

impl PollError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for poll operations.
pub type PollResult<T> = Result<T, PollError>;
