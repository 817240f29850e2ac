//! Error types for request framing and command execution.
//!
//! [`DispatchError`] covers the wire layer: lines that cannot be read or
//! parsed. [`CommandError`] covers semantic failures inside a command. Both
//! reach the client as a single `Error: ...` line inside a normal frame;
//! only transport faults end the connection.

use std::io;

use thiserror::Error;

use jobboard_protocol::PayloadError;

use crate::store::StoreError;

const MAX_ECHO_CHARS: usize = 64;

/// Errors surfaced while reading and framing requests.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command line was not a decimal integer.
    #[error("invalid command '{line}'")]
    MalformedCommand {
        /// Leading characters of the rejected line.
        line: String,
    },

    /// The stream ended before the payload line of a payload command.
    #[error("missing data for command {code}")]
    MissingPayload {
        /// Command code left without its payload.
        code: i32,
    },

    /// A request line was not valid UTF-8.
    #[error("request line is not valid UTF-8")]
    InvalidEncoding,

    /// A request line exceeded the size limit.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Length of the discarded line in bytes.
        size: usize,
        /// Configured line limit in bytes.
        max_size: usize,
    },

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Creates a malformed command error, echoing at most a short prefix of
    /// the offending line.
    pub fn malformed_command(line: &str) -> Self {
        Self::MalformedCommand {
            line: line.chars().take(MAX_ECHO_CHARS).collect(),
        }
    }

    /// Creates a missing payload error.
    pub fn missing_payload(code: i32) -> Self {
        Self::MissingPayload { code }
    }

    /// Creates a request too large error.
    pub fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }

    /// Whether the session can keep reading after reporting this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedCommand { .. }
                | Self::MissingPayload { .. }
                | Self::InvalidEncoding
                | Self::RequestTooLarge { .. }
        )
    }

    /// Response body reported to the client.
    pub fn response_text(&self) -> String {
        format!("Error: {self}")
    }
}

/// Semantic failures raised while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Job posting payload could not be decoded.
    #[error("Invalid job data format ({0})")]
    InvalidJobData(#[source] PayloadError),

    /// Application payload could not be decoded.
    #[error("Invalid application data format ({0})")]
    InvalidApplicationData(#[source] PayloadError),

    /// Accept or reject payload carried no usable application ID.
    #[error("Invalid application ID ({0})")]
    InvalidApplicationId(#[source] PayloadError),

    /// Referenced job posting does not exist.
    #[error("Job not found")]
    JobNotFound,

    /// Referenced application does not exist.
    #[error("Application not found")]
    ApplicationNotFound,

    /// The store could not serve the request.
    #[error("internal store failure")]
    Internal(#[source] StoreError),
}

impl CommandError {
    /// Response body reported to the client.
    pub fn response_text(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<StoreError> for CommandError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::JobNotFound { .. } => Self::JobNotFound,
            StoreError::ApplicationNotFound { .. } => Self::ApplicationNotFound,
            StoreError::Poisoned => Self::Internal(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_command_echo_is_bounded() {
        let line = "x".repeat(500);
        let error = DispatchError::malformed_command(&line);
        assert!(error.response_text().len() < 100);
        assert!(error.is_recoverable());
    }

    #[test]
    fn oversized_requests_are_recoverable() {
        let error = DispatchError::request_too_large(2_000_000, 1_048_576);
        assert!(error.is_recoverable());
        assert!(error.response_text().starts_with("Error: request too large"));
    }

    #[test]
    fn store_errors_map_to_client_messages() {
        let error = CommandError::from(StoreError::JobNotFound {
            job_id: String::from("JOB9"),
        });
        assert_eq!(error.response_text(), "Error: Job not found");

        let error = CommandError::from(StoreError::ApplicationNotFound {
            application_id: String::from("APP9"),
        });
        assert_eq!(error.response_text(), "Error: Application not found");

        let error = CommandError::from(StoreError::Poisoned);
        assert_eq!(error.response_text(), "Error: internal store failure");
    }
}
