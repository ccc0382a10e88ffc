// Error taxonomy shared by every command. Each variant maps to one of the
// ways a single invocation can stop: missing configuration, empty input,
// a transport failure, a non-2xx upstream answer or an unreadable body.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} is not configured")]
    MissingConfig(String),

    #[error("{0}")]
    EmptyInput(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    #[error("invalid value for header {0}")]
    InvalidHeader(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    /// The upstream answered, but the body is not JSON. The raw text is
    /// kept so the caller can show it.
    #[error("failed to parse upstream payload as JSON")]
    InvalidJson { body: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Raw upstream text worth echoing after the error line, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            CliError::InvalidJson { body } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
