//! Error types for remove.bg API operations

use thiserror::Error;

/// Result type alias for remove.bg API operations
pub type Result<T> = std::result::Result<T, RemoveBgError>;

/// Error types for remove.bg API operations
///
/// Note that vendor-side request rejections (non-2xx responses) are *not*
/// represented here: they are reported through
/// [`RemovalOutcome::Rejected`](crate::RemovalOutcome) so that callers who
/// treat the output file as a best-effort side artifact keep working
/// unchanged.
#[derive(Error, Debug)]
pub enum RemoveBgError {
    /// Caller passed an option outside its allowed set, or requested a call
    /// with no way to consume the result
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection, TLS, DNS resolution or timeout failures from the HTTP
    /// transport, propagated unmodified
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RemoveBgError {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid argument error for a value outside a closed set
    pub fn unknown_value(parameter: &str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidArgument(format!(
            "Invalid {}: '{}' (allowed: {})",
            parameter,
            value,
            allowed.join(", ")
        ))
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }
}
