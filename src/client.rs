//! HTTP client for the remove.bg API
//!
//! This module implements the single round trip the vendor API offers: build
//! a form request from validated options, POST it once, and either persist
//! the result bytes or log the structured error the API returned. There are
//! no retries and no intermediate states.

use crate::config::{Background, RemovalOptions};
use crate::error::{RemoveBgError, Result};
use crate::types::RemovalOutcome;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The fixed vendor endpoint all requests go to
pub const API_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key (never the body or query string)
const API_KEY_HEADER: &str = "X-Api-Key";

/// Image payload for a single request, exactly one of the three entry points
enum ImageSource {
    File(PathBuf),
    Url(String),
    Base64(String),
}

/// Non-2xx response body shape: `{"errors": [{"title": "..."}]}`
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    title: Option<String>,
}

/// Client for the remove.bg background removal API
///
/// The client holds no mutable state across calls: the API key, endpoint and
/// timeout are immutable and the underlying `reqwest::Client` is safe for
/// concurrent use, so a single instance can be shared across tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use removebg::{RemoveBg, RemovalOptions};
///
/// # async fn example() -> removebg::Result<()> {
/// let client = RemoveBg::new("your-api-key")?;
/// let options = RemovalOptions::builder()
///     .output_path("cat-no-bg.png")
///     .build();
/// let outcome = client.remove_from_file("cat.jpg", &options).await?;
/// assert!(outcome.is_processed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoveBg {
    api_key: String,
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

/// Builder for [`RemoveBg`] clients
#[derive(Debug, Default)]
pub struct RemoveBgBuilder {
    api_key: String,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl RemoveBgBuilder {
    /// Override the request timeout (default 30 seconds)
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the API endpoint
    ///
    /// Intended for tests and proxies; production use keeps
    /// [`API_ENDPOINT`].
    #[must_use]
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Reuse an existing `reqwest::Client` for connection pooling
    ///
    /// Connection reuse, TLS and pooling behavior belong to the supplied
    /// client; the per-request timeout is still applied.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Finalize the client
    ///
    /// # Errors
    /// - Failed to construct the underlying HTTP client
    pub fn build(self) -> Result<RemoveBg> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };
        Ok(RemoveBg {
            api_key: self.api_key,
            endpoint: self.endpoint.unwrap_or_else(|| API_ENDPOINT.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            client,
        })
    }
}

impl RemoveBg {
    /// Create a new client with the default endpoint and timeout
    ///
    /// # Errors
    /// - Failed to construct the underlying HTTP client
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a client builder for custom timeout, endpoint or session
    #[must_use]
    pub fn builder<S: Into<String>>(api_key: S) -> RemoveBgBuilder {
        RemoveBgBuilder {
            api_key: api_key.into(),
            ..RemoveBgBuilder::default()
        }
    }

    /// Remove the background from a local image file
    ///
    /// The file is read in binary mode and uploaded as the `image_file`
    /// multipart part. Failure to read it is an [`RemoveBgError::Io`].
    ///
    /// # Errors
    /// - `Io`: source or background file could not be read
    /// - `Transport`: connection, TLS, DNS or timeout failure
    pub async fn remove_from_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &RemovalOptions,
    ) -> Result<RemovalOutcome> {
        self.submit(ImageSource::File(path.as_ref().to_path_buf()), options)
            .await
    }

    /// Remove the background from an image at a remote URL
    ///
    /// The URL is passed through as the `image_url` form field; the vendor
    /// fetches it server-side.
    ///
    /// # Errors
    /// - `InvalidArgument`: neither an output path nor `return_bytes` was
    ///   requested
    /// - `Io`: background file could not be read
    /// - `Transport`: connection, TLS, DNS or timeout failure
    pub async fn remove_from_url<S: Into<String>>(
        &self,
        url: S,
        options: &RemovalOptions,
    ) -> Result<RemovalOutcome> {
        options.require_consumer()?;
        self.submit(ImageSource::Url(url.into()), options).await
    }

    /// Remove the background from a base64-encoded image string
    ///
    /// The string is passed through verbatim as the `image_file_b64` form
    /// field; no local decoding happens.
    ///
    /// # Errors
    /// - `InvalidArgument`: neither an output path nor `return_bytes` was
    ///   requested
    /// - `Io`: background file could not be read
    /// - `Transport`: connection, TLS, DNS or timeout failure
    pub async fn remove_from_base64<S: Into<String>>(
        &self,
        base64_img: S,
        options: &RemovalOptions,
    ) -> Result<RemovalOutcome> {
        options.require_consumer()?;
        self.submit(ImageSource::Base64(base64_img.into()), options)
            .await
    }

    /// Perform the single build-request / send / handle-response round trip
    async fn submit(
        &self,
        source: ImageSource,
        options: &RemovalOptions,
    ) -> Result<RemovalOutcome> {
        let fields = options.form_fields();
        let bg_file = match &options.background {
            Some(Background::File(path)) => Some(path.clone()),
            _ => None,
        };

        tracing::debug!(endpoint = %self.endpoint, "sending background removal request");

        let request = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.timeout);

        // Multipart body whenever a file part is present, URL-encoded form
        // otherwise.
        let has_file_part = matches!(source, ImageSource::File(_)) || bg_file.is_some();
        let response = if has_file_part {
            let mut form = Form::new();
            for (name, value) in fields {
                form = form.text(name, value);
            }
            form = match source {
                ImageSource::File(path) => form.part("image_file", file_part(&path).await?),
                ImageSource::Url(url) => form.text("image_url", url),
                ImageSource::Base64(data) => form.text("image_file_b64", data),
            };
            if let Some(path) = bg_file {
                form = form.part("bg_image_file", file_part(&path).await?);
            }
            request.multipart(form).send().await?
        } else {
            let mut fields = fields;
            match source {
                ImageSource::Url(url) => fields.push(("image_url", url)),
                ImageSource::Base64(data) => fields.push(("image_file_b64", data)),
                ImageSource::File(_) => unreachable!("file sources always use multipart"),
            }
            request.form(&fields).send().await?
        };

        handle_response(response, options).await
    }
}

/// Deliver the response: persist and/or return bytes on success, log the
/// structured vendor error on failure
async fn handle_response(
    response: reqwest::Response,
    options: &RemovalOptions,
) -> Result<RemovalOutcome> {
    let status = response.status();
    if status.is_success() {
        let content = response.bytes().await?;
        let mut written_to = None;
        if let Some(path) = &options.output_path {
            // A write failure is logged, never propagated: the result may
            // still be consumed through the returned bytes.
            match tokio::fs::write(path, &content).await {
                Ok(()) => written_to = Some(path.clone()),
                Err(e) => {
                    tracing::error!(
                        file = %path.display(),
                        error = %e,
                        "unable to write result file"
                    );
                },
            }
        }
        return Ok(RemovalOutcome::Processed {
            bytes: options.return_bytes.then(|| content.to_vec()),
            written_to,
        });
    }

    let body = response.bytes().await.unwrap_or_default();
    let reason = extract_error_reason(&body);
    let file_name = options
        .output_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    tracing::error!(
        file = %file_name,
        reason = %reason,
        status = status.as_u16(),
        "unable to save result"
    );
    Ok(RemovalOutcome::Rejected {
        status: status.as_u16(),
        reason,
    })
}

/// Read a local file into a named multipart part
///
/// Reading the whole file up front keeps the handle scoped to this function:
/// it is released before the request is sent, on success and on error alike.
async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| RemoveBgError::file_io_error("read image file", path, e))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(Part::bytes(bytes).file_name(file_name))
}

/// Extract the logged reason from a non-2xx response body
///
/// Returns the lower-cased first error title, or `"unknown error"` when the
/// body is not JSON or the expected shape is absent.
fn extract_error_reason(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.errors.into_iter().next())
        .and_then(|detail| detail.title)
        .map_or_else(|| "unknown error".to_string(), |title| title.to_lowercase())
}
