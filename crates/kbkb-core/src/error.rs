//! Error types for kbkb-core.

use thiserror::Error;

/// Errors raised when parsing strategy names from text.
///
/// Building and analyzing a grid never fails; these only surface while
/// reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KbkbError {
    /// No classifier with this name.
    #[error("unknown classifier: {0} (expected annotation or hash)")]
    UnknownClassifier(String),

    /// No stability gate with this name.
    #[error("unknown stability gate: {0} (expected always or require-stable)")]
    UnknownGate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_classifier_message() {
        let err = KbkbError::UnknownClassifier("rainbow".to_string());
        assert!(err.to_string().contains("unknown classifier"));
        assert!(err.to_string().contains("rainbow"));
    }

    #[test]
    fn test_unknown_gate_message() {
        let err = KbkbError::UnknownGate("sometimes".to_string());
        assert!(err.to_string().contains("sometimes"));
    }
}
