//! Error types for Reposcout

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReposcoutError>;

#[derive(Error, Debug)]
pub enum ReposcoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ReposcoutError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReposcoutError::InvalidInput(_) => 3,
            ReposcoutError::Api(_) => 1,
            ReposcoutError::Config(_) => 1,
        }
    }

    /// Message shown to the user in a notice.
    ///
    /// API failures render without the "API error:" prefix so that notices
    /// read "Failed to fetch user: User not found: octocat".
    pub fn user_message(&self) -> String {
        match self {
            ReposcoutError::Api(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            ApiError::Http {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            ApiError::Network(error.to_string())
        }
    }
}
