//! Classification of transport outcomes.
//!
//! Every exchange with the AI service ends in exactly one of: a decoded JSON
//! body, or a [`Failure`] tagged with its [`FailureKind`]. Operations then apply
//! their own message rules on top of the failure.

use http::StatusCode;
use serde_json::Value;
use std::fmt;

use crate::error::TransportError;
use crate::response::Response;

/// Why an exchange did not produce a usable body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The call could not complete: connection refused, DNS, TLS, timeout, local I/O.
    TransportFault,
    /// The service answered with a non-success status and a JSON body.
    ProtocolFailure,
    /// The body could not be decoded as JSON, whatever the status.
    DecodeFailure,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::TransportFault => "transport_fault",
            FailureKind::ProtocolFailure => "protocol_failure",
            FailureKind::DecodeFailure => "decode_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    kind: FailureKind,
    status: Option<StatusCode>,
    body: Option<Value>,
    cause: String,
}

impl Failure {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// HTTP status, absent for transport faults
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Decoded error body, only present for protocol failures
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn into_body(self) -> Option<Value> {
        self.body
    }

    /// Diagnostic description of the underlying fault, for logs
    #[must_use]
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// The `detail` field of the error body, if any
    #[must_use]
    pub fn detail(&self) -> Option<&Value> {
        self.body.as_ref()?.get("detail")
    }

    /// `detail` rendered as a message.
    ///
    /// Strings are returned verbatim, any other non-null value as its JSON
    /// serialization. `None` when the field is absent, null or a blank string.
    #[must_use]
    pub fn detail_message(&self) -> Option<String> {
        match self.detail()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {}): {}", self.kind, status.as_u16(), self.cause),
            None => write!(f, "{}: {}", self.kind, self.cause),
        }
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        Failure {
            kind: FailureKind::TransportFault,
            status: None,
            body: None,
            cause: err.to_string(),
        }
    }
}

/// Classify a transport outcome.
///
/// # Errors
/// Returns a [`Failure`] for anything other than a 2xx response with a non-null
/// JSON body.
pub fn normalize(outcome: Result<Response, TransportError>) -> Result<Value, Failure> {
    let response = outcome?;
    let status = response.status();
    let decoded = response.json::<Value>();

    match (status.is_success(), decoded) {
        (true, Ok(Value::Null)) => Err(Failure {
            kind: FailureKind::DecodeFailure,
            status: Some(status),
            body: None,
            cause: "AI service returned a null body".to_owned(),
        }),
        (true, Ok(value)) => Ok(value),
        (false, Ok(value)) => Err(Failure {
            kind: FailureKind::ProtocolFailure,
            status: Some(status),
            body: Some(value),
            cause: format!("AI service responded with status {}", status.as_u16()),
        }),
        (_, Err(err)) => Err(Failure {
            kind: FailureKind::DecodeFailure,
            status: Some(status),
            body: None,
            cause: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    fn response(status: StatusCode, body: &'static [u8]) -> Result<Response, TransportError> {
        Ok(Response::new(status, Bytes::from_static(body)))
    }

    #[test]
    fn test_success_with_json_body() {
        let value = normalize(response(StatusCode::OK, br#"{"status":"ok"}"#)).unwrap();
        assert_eq!(value, json!({"status": "ok"}));
    }

    #[test]
    fn test_transport_error_is_transport_fault() {
        let failure = normalize(Err(TransportError::Timeout("elapsed".into()))).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::TransportFault);
        assert!(failure.status().is_none());
        assert!(failure.body().is_none());
        assert!(failure.cause().contains("elapsed"));
    }

    #[test]
    fn test_error_status_with_json_is_protocol_failure() {
        let failure = normalize(response(
            StatusCode::BAD_REQUEST,
            br#"{"detail":"Only PDF is supported"}"#,
        ))
        .unwrap_err();

        assert_eq!(failure.kind(), FailureKind::ProtocolFailure);
        assert_eq!(failure.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(failure.detail_message().as_deref(), Some("Only PDF is supported"));
    }

    #[test]
    fn test_success_status_with_garbage_is_decode_failure() {
        let failure = normalize(response(StatusCode::OK, b"not json")).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::DecodeFailure);
        assert_eq!(failure.status(), Some(StatusCode::OK));
        assert!(failure.body().is_none());
    }

    #[test]
    fn test_error_status_with_html_is_decode_failure() {
        let failure =
            normalize(response(StatusCode::BAD_GATEWAY, b"<html>502</html>")).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::DecodeFailure);
        assert_eq!(failure.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(failure.detail_message().is_none());
    }

    #[test]
    fn test_structured_detail_is_serialized() {
        let failure = normalize(response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":{"field":"question"}}"#,
        ))
        .unwrap_err();
        assert_eq!(failure.detail_message().as_deref(), Some(r#"{"field":"question"}"#));
    }

    #[test]
    fn test_null_or_missing_detail_has_no_message() {
        let null = normalize(response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"detail":null}"#))
            .unwrap_err();
        assert!(null.detail_message().is_none());

        let missing =
            normalize(response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"boom"}"#))
                .unwrap_err();
        assert!(missing.detail().is_none());
        assert_eq!(missing.into_body(), Some(json!({"error": "boom"})));
    }

    #[test]
    fn test_blank_string_detail_has_no_message() {
        for body in [r#"{"detail":""}"#, r#"{"detail":"   "}"#] {
            let failure =
                normalize(response(StatusCode::BAD_REQUEST, body.as_bytes())).unwrap_err();
            assert_eq!(failure.kind(), FailureKind::ProtocolFailure);
            assert!(failure.detail().is_some());
            assert!(failure.detail_message().is_none());
        }
    }

    #[test]
    fn test_null_success_body_is_decode_failure() {
        let failure = normalize(response(StatusCode::OK, b"null")).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::DecodeFailure);
        assert_eq!(failure.status(), Some(StatusCode::OK));
        assert!(failure.body().is_none());
    }

    #[test]
    fn test_null_error_body_is_protocol_failure_without_detail() {
        let failure =
            normalize(response(StatusCode::INTERNAL_SERVER_ERROR, b"null")).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ProtocolFailure);
        assert!(failure.detail_message().is_none());
    }

    #[test]
    fn test_display_includes_status() {
        let failure = normalize(response(StatusCode::SERVICE_UNAVAILABLE, br#"{}"#)).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "protocol_failure (HTTP 503): AI service responded with status 503"
        );
    }
}
