use boston_ckan::CkanError;
use thiserror::Error;

/// Errors that can occur while fetching and printing the Boston query
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure or non-success HTTP status
    #[error("Network error: {0}")]
    NetworkError(#[source] CkanError),

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(#[source] serde_json::Error),

    /// Writing the document to the output failed
    #[error("Output failed: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl FetchError {
    /// Create a new configuration error
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }
}

impl From<CkanError> for FetchError {
    fn from(error: CkanError) -> Self {
        match error {
            CkanError::ParseError(e) => Self::ParseError(e),
            other => Self::NetworkError(other),
        }
    }
}

/// Type alias for Results using FetchError
pub type Result<T> = std::result::Result<T, FetchError>;
