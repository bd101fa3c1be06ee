//! # remove.bg API Client
//!
//! A Rust client library for the [remove.bg](https://www.remove.bg) image
//! background removal API. It accepts an image as a local file, a remote
//! URL, or a base64-encoded string, forwards it with processing options to
//! the vendor endpoint, and persists and/or returns the resulting image
//! bytes.
//!
//! ## Features
//!
//! - **Three image sources**: local file upload (multipart), remote URL, or
//!   base64 string
//! - **Typed options**: closed vendor enumerations (`size`, `type`,
//!   `type_level`, `format`, `channels`) are Rust enums, so invalid values are
//!   rejected before any network call
//! - **Backgrounds**: replace the removed background with a local file, a
//!   remote URL, or a solid color
//! - **Best-effort delivery**: vendor rejections are logged and reported as
//!   a result variant, never a panic or error; transport failures propagate
//! - **Explicit logging**: the library emits `tracing` events; the host
//!   wires destinations via the [`logging`] module
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use removebg::{RemoveBg, RemovalOptions, OutputSize};
//!
//! # async fn example() -> removebg::Result<()> {
//! // Optional: append error-level log entries to a file.
//! let _log_guard = removebg::logging::init_error_log_file("error.log")?;
//!
//! let client = RemoveBg::new("your-api-key")?;
//! let options = RemovalOptions::builder()
//!     .size(OutputSize::Hd)
//!     .output_path("subject.png")
//!     .build();
//!
//! let outcome = client.remove_from_file("photo.jpg", &options).await?;
//! if let Some(reason) = outcome.rejection_reason() {
//!     eprintln!("remove.bg rejected the request: {}", reason);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory results
//!
//! ```rust,no_run
//! use removebg::{RemoveBg, RemovalOptions};
//!
//! # async fn example() -> removebg::Result<()> {
//! let client = RemoveBg::new("your-api-key")?;
//! let options = RemovalOptions::builder()
//!     .no_output_file()
//!     .return_bytes(true)
//!     .build();
//! let outcome = client
//!     .remove_from_url("https://example.com/photo.jpg", &options)
//!     .await?;
//! if let Some(png) = outcome.into_bytes() {
//!     // hand the bytes to the rest of the pipeline
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Public API exports
pub use client::{RemoveBg, RemoveBgBuilder, API_ENDPOINT, DEFAULT_TIMEOUT};
pub use config::{
    Background, Channels, ForegroundType, OutputFormat, OutputSize, RemovalOptions,
    RemovalOptionsBuilder, TypeLevel, DEFAULT_OUTPUT_FILE,
};
pub use error::{RemoveBgError, Result};
pub use logging::{LogOutput, LoggingConfig};
pub use types::RemovalOutcome;

use std::path::Path;

/// Remove the background from a local image file with a one-off client
///
/// Convenience wrapper over [`RemoveBg::remove_from_file`] for callers who
/// do not keep a client around. Repeated calls should construct a
/// [`RemoveBg`] once and reuse its connection pool.
pub async fn remove_background_from_file<P: AsRef<Path>>(
    path: P,
    api_key: &str,
    options: &RemovalOptions,
) -> Result<RemovalOutcome> {
    RemoveBg::new(api_key)?.remove_from_file(path, options).await
}

/// Remove the background from an image at a remote URL with a one-off client
///
/// Convenience wrapper over [`RemoveBg::remove_from_url`].
pub async fn remove_background_from_url(
    url: &str,
    api_key: &str,
    options: &RemovalOptions,
) -> Result<RemovalOutcome> {
    RemoveBg::new(api_key)?.remove_from_url(url, options).await
}

/// Remove the background from a base64-encoded image with a one-off client
///
/// Convenience wrapper over [`RemoveBg::remove_from_base64`].
pub async fn remove_background_from_base64(
    base64_img: &str,
    api_key: &str,
    options: &RemovalOptions,
) -> Result<RemovalOutcome> {
    RemoveBg::new(api_key)?
        .remove_from_base64(base64_img, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_compiles() {
        // Basic compilation test to ensure API is well-formed
        let _options = RemovalOptions::default();
        let _client = RemoveBg::new("test-key").unwrap();
    }
}
