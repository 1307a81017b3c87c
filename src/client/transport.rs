use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Payload attached to a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Single-file multipart form, as used by CSV uploads.
    Multipart {
        field: String,
        file_name: String,
        mime: String,
        content: Vec<u8>,
    },
}

/// Caller-supplied method, headers and body for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    #[must_use]
    pub fn post_json(body: Value) -> Self {
        Self::post().with_body(RequestBody::Json(body))
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Raw outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, empty when unknown.
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `"500 Internal Server Error"`, or just the code without a reason.
    #[must_use]
    pub fn status_line(&self) -> String {
        let reason = self.reason.trim();
        if reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {reason}", self.status)
        }
    }
}

/// Failure before any response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message }
    }
}

/// Network seam: performs one attempt and reports exactly one outcome.
///
/// Implementations never retry and never impose a timeout.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> ApiResult<Self> {
        let client = reqwest::Client::builder().build().map_err(|err| {
            ApiError::InvalidRequest(format!("failed to build http client: {err}"))
        })?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.request(options.method.clone(), url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = match &options.body {
            RequestBody::Empty => request,
            RequestBody::Json(body) => request.json(body),
            RequestBody::Multipart {
                field,
                file_name,
                mime,
                content,
            } => {
                let part = Part::bytes(content.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)?;
                request.multipart(Form::new().part(field.clone(), part))
            }
        };

        let response = request.send().await?;
        let status = response.status();
        // Body is read once; status failures reuse this text. A status has
        // arrived, so a failed read becomes the body instead of a transport error.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = TransportError::from(err);
                warn!(
                    url,
                    status = status.as_u16(),
                    error = %err,
                    "failed to read response body"
                );
                err.message
            }
        };
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}
