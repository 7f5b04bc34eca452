//! Error types for treediff
//!
//! Filesystem failures are fatal for a run: they propagate out of the
//! comparison and end the process. A missing diff viewer is the one
//! condition the tool tries to remediate before giving up.

use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Results in the treediff library
pub type Result<T> = std::result::Result<T, TreeDiffError>;

/// Main error type for all treediff operations
#[derive(Debug, Error)]
pub enum TreeDiffError {
    /// I/O errors during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walk directory error from walkdir crate
    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// A root handed to the comparator is not a directory
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// External tool could not be started
    #[error("Tool '{tool}' is not available: {reason}")]
    ToolUnavailable {
        /// Program name
        tool: String,
        /// Why the spawn failed
        reason: String,
    },

    /// Provisioning the external tool failed
    #[error("Failed to install '{tool}': {reason}")]
    InstallFailed {
        /// Program name
        tool: String,
        /// Installer output or exit status
        reason: String,
    },

    /// Reading user input failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// A non-interactive prompter ran out of answers
    #[error("No input available for prompt: {0}")]
    NoInput(String),

    /// Generic error for unexpected conditions
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TreeDiffError {
    /// Create a prompt error with a custom message
    pub fn prompt(msg: impl Into<String>) -> Self {
        TreeDiffError::Prompt(msg.into())
    }

    /// Create an internal error with a custom message
    pub fn internal(msg: impl Into<String>) -> Self {
        TreeDiffError::Internal(msg.into())
    }

    /// Check if this error is recoverable
    ///
    /// Only the missing-tool family is; everything touching the trees
    /// themselves aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TreeDiffError::ToolUnavailable { .. } | TreeDiffError::InstallFailed { .. }
        )
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            TreeDiffError::NotADirectory(path) => {
                format!("{:?} is not a directory. Paths are resolved from the current working directory.", path)
            }
            TreeDiffError::ToolUnavailable { tool, .. } => {
                format!("Could not run '{}'. Install it or pick another viewer with --viewer.", tool)
            }
            _ => self.to_string(),
        }
    }
}
