//! Error types for kbkb-terminal.

use thiserror::Error;

/// Errors that can occur while drawing to the terminal.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
