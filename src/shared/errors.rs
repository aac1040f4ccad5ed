//! Error handling for the application

use thiserror::Error;

/// Remote API errors
///
/// `Status` carries the response body the provider sent back, `Transport`
/// covers everything that failed before a response arrived.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Contract call rejected: {0}")]
    ContractCall(String),

    #[error("Invalid contract call argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Whether the provider answered with a body we can show.
    pub fn has_response_body(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Scenario arithmetic that left the representable range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ClientSetup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_body() {
        let err = ApiError::Status {
            status: 401,
            body: "{\"error\":\"unauthorized\"}".to_string(),
        };
        assert!(err.has_response_body());
        assert_eq!(err.to_string(), "API returned 401: {\"error\":\"unauthorized\"}");
    }

    #[test]
    fn test_transport_error_has_no_body() {
        let err = ApiError::Transport("connection refused".to_string());
        assert!(!err.has_response_body());
    }
}
