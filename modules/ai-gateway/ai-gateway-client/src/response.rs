use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::TransportError;

/// Fully buffered HTTP response.
///
/// The AI service answers with small JSON documents, so the transport reads the
/// whole body before handing the response back.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Deserialize the body as JSON
    ///
    /// # Errors
    /// Returns [`TransportError::Serialization`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        let value = serde_json::from_slice(&self.body)?;
        Ok(value)
    }
}
