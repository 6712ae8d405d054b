// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the background-processing service.
//!
//! The service exposes one `POST` endpoint per [`Operation`]. Each takes a
//! multipart body with the image in the `file` field and answers `200` with
//! the processed image as the response body. Anything else is a failure.

use crate::studio::{Operation, SourceFile, TransformOutcome, TransformRequest};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::fmt;
use std::time::Duration;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("SalesStudio/", env!("CARGO_PKG_VERSION"));

/// Errors from a remote transform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformRequestError {
    /// The configured base URL cannot be used.
    InvalidEndpoint(String),
    /// The service could not be reached.
    Unreachable(String),
    /// The service did not answer in time.
    Timeout,
    /// The service answered with a non-success status.
    Status(u16),
    /// The service answered `200` without an image.
    EmptyBody,
    /// Any other transport failure.
    Transport(String),
}

impl TransformRequestError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            TransformRequestError::InvalidEndpoint(_) => "error-service-invalid-endpoint",
            TransformRequestError::Unreachable(_) => "error-service-unreachable",
            TransformRequestError::Timeout => "error-service-timeout",
            TransformRequestError::Status(_) => "error-service-status",
            TransformRequestError::EmptyBody => "error-service-empty-body",
            TransformRequestError::Transport(_) => "error-service-transport",
        }
    }

    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransformRequestError::Timeout
        } else if err.is_connect() {
            TransformRequestError::Unreachable(err.to_string())
        } else {
            TransformRequestError::Transport(err.to_string())
        }
    }
}

impl fmt::Display for TransformRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformRequestError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {msg}"),
            TransformRequestError::Unreachable(msg) => write!(f, "Service unreachable: {msg}"),
            TransformRequestError::Timeout => write!(f, "Service timed out"),
            TransformRequestError::Status(code) => write!(f, "HTTP status: {code}"),
            TransformRequestError::EmptyBody => write!(f, "Service returned an empty body"),
            TransformRequestError::Transport(msg) => write!(f, "Transport error: {msg}"),
        }
    }
}

impl std::error::Error for TransformRequestError {}

/// Connection settings for [`ServiceClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub base_url: String,
    pub timeout: Duration,
}

/// Client for the processing endpoints. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Builds a client for `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformRequestError::InvalidEndpoint`] if the base URL is
    /// not an absolute `http(s)` URL, or if the HTTP client cannot be built.
    pub fn new(settings: &ServiceSettings) -> Result<Self, TransformRequestError> {
        let base_url = normalize_base_url(&settings.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TransformRequestError::InvalidEndpoint(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the endpoint serving `operation`.
    #[must_use]
    pub fn endpoint(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.endpoint_path())
    }

    /// Sends `request` and waits for the processed image.
    ///
    /// Never fails: errors are carried inside the returned outcome.
    pub async fn submit(&self, request: TransformRequest) -> TransformOutcome {
        let result = self.post(request.operation, &request.file).await;
        TransformOutcome::of(&request, result)
    }

    async fn post(
        &self,
        operation: Operation,
        file: &SourceFile,
    ) -> Result<Bytes, TransformRequestError> {
        // `Bytes` is reference counted, so the upload shares the source buffer.
        let part = Part::stream(file.bytes().clone())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|e| TransformRequestError::Transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoint(operation);
        tracing::debug!(%operation, %url, "posting image");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransformRequestError::from_reqwest(&e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(TransformRequestError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransformRequestError::from_reqwest(&e))?;
        if body.is_empty() {
            return Err(TransformRequestError::EmptyBody);
        }
        Ok(body)
    }
}

/// Validates a base URL and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, TransformRequestError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| TransformRequestError::InvalidEndpoint(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransformRequestError::InvalidEndpoint(format!(
            "{trimmed}: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::Studio;

    fn settings(base_url: &str) -> ServiceSettings {
        ServiceSettings {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn request_for(operation: Operation) -> TransformRequest {
        let mut studio = Studio::new();
        studio.select_file(Some(SourceFile::new("photo.png", b"image-bytes".to_vec())));
        studio.trigger(operation).expect("request dispatched")
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = ServiceClient::new(&settings("http://127.0.0.1:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            client.endpoint(Operation::RemoveBackground),
            "http://127.0.0.1:8000/process-image"
        );
        assert_eq!(
            client.endpoint(Operation::BlurBackground),
            "http://127.0.0.1:8000/process-image-blur"
        );
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        assert!(matches!(
            ServiceClient::new(&settings("not a url")),
            Err(TransformRequestError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            ServiceClient::new(&settings("ftp://example.com")),
            Err(TransformRequestError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn error_display_and_keys() {
        let err = TransformRequestError::Status(503);
        assert_eq!(err.to_string(), "HTTP status: 503");
        assert_eq!(err.i18n_key(), "error-service-status");
        assert_eq!(TransformRequestError::Timeout.i18n_key(), "error-service-timeout");
    }

    #[tokio::test]
    async fn submit_posts_multipart_file_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process-image")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data".to_string()),
            )
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::Regex(r#"name="file""#.to_string()),
                mockito::Matcher::Regex(r#"filename="photo.png""#.to_string()),
                mockito::Matcher::Regex("image-bytes".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body("processed")
            .create_async()
            .await;

        let client = ServiceClient::new(&settings(&server.url())).unwrap();
        let outcome = client.submit(request_for(Operation::RemoveBackground)).await;

        mock.assert_async().await;
        assert_eq!(outcome.operation, Operation::RemoveBackground);
        assert_eq!(outcome.result.unwrap().as_ref(), b"processed");
    }

    #[tokio::test]
    async fn blur_uses_its_own_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process-image-blur")
            .with_status(200)
            .with_body("blurred")
            .create_async()
            .await;

        let client = ServiceClient::new(&settings(&server.url())).unwrap();
        let outcome = client.submit(request_for(Operation::BlurBackground)).await;

        mock.assert_async().await;
        assert_eq!(outcome.result.unwrap().as_ref(), b"blurred");
    }

    #[tokio::test]
    async fn non_ok_status_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/process-image")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ServiceClient::new(&settings(&server.url())).unwrap();
        let outcome = client.submit(request_for(Operation::RemoveBackground)).await;

        assert_eq!(outcome.result, Err(TransformRequestError::Status(500)));
    }

    #[tokio::test]
    async fn empty_body_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/process-image")
            .with_status(200)
            .create_async()
            .await;

        let client = ServiceClient::new(&settings(&server.url())).unwrap();
        let outcome = client.submit(request_for(Operation::RemoveBackground)).await;

        assert_eq!(outcome.result, Err(TransformRequestError::EmptyBody));
    }

    #[tokio::test]
    async fn unreachable_service_is_failure() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = ServiceClient::new(&settings("http://127.0.0.1:9")).unwrap();
        let outcome = client.submit(request_for(Operation::BlurBackground)).await;

        assert!(outcome.result.is_err());
    }
}
