use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

use crate::body::{Body, FilePart};
use crate::error::TransportError;
use crate::request::Request;
use crate::response::Response;

/// One HTTP request/response exchange with the AI service.
///
/// Implementations must support any number of concurrent `send` calls. A
/// response with an error status is returned as `Ok`; only a failure to
/// complete the exchange is an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// reqwest-backed transport bound to the AI service base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with a default timeout applied to
    /// requests that carry no override.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] if the underlying client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        default_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(default_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(request.path());

        let mut req_builder = self.http_client.request(request.method().clone(), &url);

        for (name, value) in request.headers() {
            req_builder = req_builder.header(name, value);
        }

        // Apply request-specific timeout if set (before consuming request)
        if let Some(timeout) = request.timeout() {
            req_builder = req_builder.timeout(timeout);
        }

        req_builder = match request.into_body() {
            Body::Empty => req_builder,
            Body::Bytes(bytes) => req_builder.body(bytes),
            Body::Multipart(part) => req_builder.multipart(file_form(part).await?),
        };

        tracing::trace!(url = %url, "sending request to AI service");

        let resp = req_builder.send().await.map_err(classify_reqwest_error)?;
        let status = resp.status();
        // The timeout also covers reading the body.
        let body = resp.bytes().await.map_err(classify_reqwest_error)?;

        Ok(Response::new(status, body))
    }
}

async fn file_form(part: FilePart) -> Result<Form, TransportError> {
    let contents = tokio::fs::read(part.path()).await?;
    let file = Part::bytes(contents).file_name(part.file_name().to_owned());
    Ok(Form::new().part(part.field().to_owned(), file))
}

fn classify_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Reqwest(e)
    }
}
