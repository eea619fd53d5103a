//! Error types for the client core.

use thiserror::Error;

use crate::domain::growth::GrowthInputError;

/// Errors raised at the HTTP API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, TLS)
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The configured request timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected schema
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// The auth endpoint answered 2xx but refused the credentials
    #[error("authentication rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Classify a reqwest error into the taxonomy above.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

/// Errors raised by the session persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("could not determine a home directory for session storage")]
    NoHomeDir,
}

/// Errors raised by the child store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("child {0} not found")]
    ChildNotFound(i64),

    #[error("no child is selected")]
    NoChildSelected,

    #[error("date of birth is required when creating a child on the server")]
    MissingBirthDate,

    #[error(transparent)]
    InvalidGrowthInput(#[from] GrowthInputError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors raised by the auth store.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error(transparent)]
    Validation(#[from] shared::RegistrationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display_includes_status_and_detail() {
        let err = ApiError::Server {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("Invalid credentials"));
    }

    #[test]
    fn test_store_error_wraps_growth_input_error() {
        let err = StoreError::from(GrowthInputError::NonPositiveHeight);
        assert!(err.to_string().contains("height"));
    }
}
