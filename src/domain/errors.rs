use thiserror::Error;

/// Shown when a registration attempt fails without a usable reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when the server or network rejects the attempt without a message.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed.";

/// Submission-level failures. These are never tied to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("registration rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("registration request failed: {0}")]
    Transport(String),
    #[error("unexpected registration failure: {0}")]
    Unexpected(String),
}

impl SubmissionError {
    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            SubmissionError::Rejected { .. } | SubmissionError::Transport(_) => {
                REGISTRATION_FAILED_MESSAGE.to_string()
            }
            SubmissionError::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;
