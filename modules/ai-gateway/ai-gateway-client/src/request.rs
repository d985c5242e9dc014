use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

use crate::body::{Body, FilePart};
use crate::error::TransportError;

/// HTTP request relative to the transport's base URL
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Body,
    timeout: Option<Duration>,
}

impl Request {
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Per-call timeout overriding the transport default
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Fluent builder for a gateway [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: HeaderMap,
    body: Body,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Encode `value` as the JSON body.
    ///
    /// # Errors
    /// Returns [`TransportError::Serialization`] if the value cannot be encoded.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, TransportError> {
        self.body = Body::from_json(value)?;
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Attach a single file as `multipart/form-data`.
    ///
    /// The transport sets the Content-Type header along with the boundary.
    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = Body::Multipart(part);
        self
    }

    #[must_use]
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// # Errors
    /// Returns [`TransportError::Build`] if no path was set.
    pub fn build(self) -> Result<Request, TransportError> {
        let method = self.method.unwrap_or(Method::GET);
        let path = self
            .path
            .ok_or_else(|| TransportError::Build("Request path is required".into()))?;

        Ok(Request {
            method,
            path,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_to_get_without_timeout() {
        let request = Request::builder().path("/health").build().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/health");
        assert!(request.timeout().is_none());
        assert_eq!(request.into_body(), Body::Empty);
    }

    #[test]
    fn test_path_is_required() {
        let err = Request::builder().method(Method::POST).build().unwrap_err();
        assert!(matches!(err, TransportError::Build(_)));
    }

    #[test]
    fn test_json_sets_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .path("/chat")
            .json(&json!({"question": "menu?"}))
            .unwrap()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_multipart_replaces_body_without_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .path("/admin/upload")
            .multipart(FilePart::new("file", "/tmp/menu.pdf", "menu.pdf"))
            .build()
            .unwrap();

        assert!(request.headers().get(http::header::CONTENT_TYPE).is_none());
        assert_eq!(
            request.into_body(),
            Body::Multipart(FilePart::new("file", "/tmp/menu.pdf", "menu.pdf"))
        );
    }
}
