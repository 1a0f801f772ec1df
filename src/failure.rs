//! Failure taxonomy for collaborator boundaries.

use thiserror::Error;

/// Typed failure surfaced by collaborators and input validation.
///
/// Failures cross the collaborator boundary as values, never as panics.
/// Command handlers translate them into result intents; user-visible
/// handling is then a reducer concern (typically a sticky error field plus a
/// transient toast effect).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// Malformed input caught before any collaborator call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Network or storage error surfaced by a repository or use case.
    #[error("collaborator failed: {message}")]
    Collaborator {
        /// Human-readable description of the failure.
        message: String,
        /// Optional machine-readable code from the collaborator.
        code: Option<String>,
    },

    /// An intent reached a handler that cannot interpret it. Logged and
    /// ignored; never surfaced as an effect.
    #[error("defect: {0}")]
    Defect(String),
}

impl Failure {
    /// A collaborator failure with a message and no code.
    pub fn collaborator(message: impl Into<String>) -> Self {
        Failure::Collaborator {
            message: message.into(),
            code: None,
        }
    }

    /// A collaborator failure carrying a machine-readable code.
    pub fn collaborator_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Failure::Collaborator {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// A validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Failure::Validation(message.into())
    }
}
