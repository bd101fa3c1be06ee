//! Result types for background removal operations

use std::path::PathBuf;

/// Outcome of a background removal request
///
/// A vendor-side rejection (non-2xx response) is deliberately *not* an
/// [`Err`]: the API error is logged at error level and reported as the
/// [`Rejected`](Self::Rejected) variant, preserving the original
/// "best-effort side artifact" contract where callers inspect the output
/// file or returned bytes rather than catching an error. Transport and
/// local I/O failures still surface as
/// [`RemoveBgError`](crate::RemoveBgError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The API accepted the request and returned the processed image
    Processed {
        /// Raw result bytes, present iff `return_bytes` was requested
        bytes: Option<Vec<u8>>,
        /// Path the result was written to, if an output path was configured
        /// and the write succeeded
        written_to: Option<PathBuf>,
    },
    /// The API rejected the request with a non-2xx status
    Rejected {
        /// HTTP status code of the response
        status: u16,
        /// Lower-cased first error title from the response body, or
        /// `"unknown error"` when the body was not parseable
        reason: String,
    },
}

impl RemovalOutcome {
    /// Whether the API accepted the request
    #[must_use]
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }

    /// Raw result bytes, if they were requested and the request succeeded
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Processed { bytes, .. } => bytes.as_deref(),
            Self::Rejected { .. } => None,
        }
    }

    /// Consume the outcome, returning the raw result bytes if present
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Processed { bytes, .. } => bytes,
            Self::Rejected { .. } => None,
        }
    }

    /// Path the result image was written to, if any
    #[must_use]
    pub fn written_to(&self) -> Option<&std::path::Path> {
        match self {
            Self::Processed { written_to, .. } => written_to.as_deref(),
            Self::Rejected { .. } => None,
        }
    }

    /// Rejection reason, if the API rejected the request
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            Self::Processed { .. } => None,
        }
    }
}
