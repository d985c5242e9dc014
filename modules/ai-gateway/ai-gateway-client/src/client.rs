use http::Method;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::body::FilePart;
use crate::config::AiGatewayConfig;
use crate::envelope::ResultEnvelope;
use crate::error::ConfigError;
use crate::models::{ChatRequest, UploadRequest};
use crate::normalizer::{self, Failure};
use crate::request::{Request, RequestBuilder};
use crate::timeouts::{Operation, TimeoutPolicy};
use crate::transport::{ReqwestTransport, Transport};

pub const UPLOAD_PATH: &str = "/admin/upload";
pub const STATUS_PATH: &str = "/admin/status";
pub const CHAT_PATH: &str = "/chat";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "file";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Document uploaded and indexed successfully";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Failed to upload document to the AI service";
pub const CHAT_SUCCESS_MESSAGE: &str = "Answer received from the AI service";
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get an answer from the AI service";
pub const STATUS_SUCCESS_MESSAGE: &str = "Index status retrieved";
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to retrieve index status from the AI service";

const HEALTHY_STATUS: &str = "ok";

/// Client for the AI inference service.
///
/// Every operation is a single round trip bounded by its timeout from the
/// [`TimeoutPolicy`]. Nothing is retried and no operation returns an error:
/// failures come back as [`ResultEnvelope::Failure`], or `false` for
/// [`GatewayClient::health_check`].
///
/// The client is cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct GatewayClient {
    transport: Arc<dyn Transport>,
    timeouts: TimeoutPolicy,
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl GatewayClient {
    /// Create a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: AiGatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport =
            ReqwestTransport::new(config.base_url, config.default_timeout, &config.user_agent)?;
        Self::with_transport(Arc::new(transport), config.timeouts)
    }

    /// Create a client over an arbitrary transport.
    ///
    /// # Errors
    /// Returns [`ConfigError::TimeoutOrdering`] if the policy is not ordered.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        timeouts: TimeoutPolicy,
    ) -> Result<Self, ConfigError> {
        timeouts.validate()?;
        Ok(Self {
            transport,
            timeouts,
        })
    }

    #[must_use]
    pub fn timeouts(&self) -> &TimeoutPolicy {
        &self.timeouts
    }

    /// Upload a document for indexing.
    ///
    /// On failure the message is the service's `detail` when it sent one.
    pub async fn upload_document(&self, request: UploadRequest) -> ResultEnvelope {
        let file_name = request.resolved_file_name();
        let builder = Request::builder()
            .method(Method::POST)
            .path(UPLOAD_PATH)
            .multipart(FilePart::new(UPLOAD_FIELD, request.file_path, file_name));

        match self.execute(Operation::Upload, builder).await {
            Ok(data) => ResultEnvelope::success(data, UPLOAD_SUCCESS_MESSAGE),
            Err(failure) => {
                log_failure(Operation::Upload, &failure);
                detail_envelope(failure, UPLOAD_FAILURE_MESSAGE)
            }
        }
    }

    /// Upload the file at `path` under its own basename.
    pub async fn upload_file(&self, path: impl Into<PathBuf>) -> ResultEnvelope {
        self.upload_document(UploadRequest::new(path)).await
    }

    /// Ask a question against the indexed documents.
    ///
    /// On failure a string `detail` is used verbatim as the message and a
    /// structured one is serialized to JSON.
    pub async fn chat(&self, request: ChatRequest) -> ResultEnvelope {
        let builder = match Request::builder()
            .method(Method::POST)
            .path(CHAT_PATH)
            .json(&request)
        {
            Ok(builder) => builder,
            Err(err) => {
                let failure = Failure::from(err);
                log_failure(Operation::Chat, &failure);
                return ResultEnvelope::failure(CHAT_FAILURE_MESSAGE, None);
            }
        };

        match self.execute(Operation::Chat, builder).await {
            Ok(data) => ResultEnvelope::success(data, CHAT_SUCCESS_MESSAGE),
            Err(failure) => {
                log_failure(Operation::Chat, &failure);
                detail_envelope(failure, CHAT_FAILURE_MESSAGE)
            }
        }
    }

    /// Shorthand for [`GatewayClient::chat`] with a plain question.
    pub async fn ask(&self, question: impl Into<String>) -> ResultEnvelope {
        self.chat(ChatRequest::new(question)).await
    }

    /// Read the state of the remote index.
    ///
    /// Remote error details are not surfaced: every failure carries the same
    /// message and no `errors`.
    pub async fn get_status(&self) -> ResultEnvelope {
        let builder = Request::builder().method(Method::GET).path(STATUS_PATH);

        match self.execute(Operation::Status, builder).await {
            Ok(data) => ResultEnvelope::success(data, STATUS_SUCCESS_MESSAGE),
            Err(failure) => {
                log_failure(Operation::Status, &failure);
                ResultEnvelope::failure(STATUS_FAILURE_MESSAGE, None)
            }
        }
    }

    /// Liveness probe: `true` only for a 2xx JSON body with `"status": "ok"`.
    pub async fn health_check(&self) -> bool {
        let builder = Request::builder().method(Method::GET).path(HEALTH_PATH);

        match self.execute(Operation::Health, builder).await {
            Ok(body) if body.get("status").and_then(Value::as_str) == Some(HEALTHY_STATUS) => true,
            Ok(body) => {
                tracing::debug!(
                    operation = %Operation::Health,
                    body = %body,
                    "AI service reported an unhealthy status"
                );
                false
            }
            Err(failure) => {
                tracing::debug!(
                    operation = %Operation::Health,
                    kind = %failure.kind(),
                    status = failure.status().map(|s| s.as_u16()),
                    error = %failure.cause(),
                    "AI service health probe failed"
                );
                false
            }
        }
    }

    async fn execute(&self, operation: Operation, builder: RequestBuilder) -> Result<Value, Failure> {
        let request = builder
            .timeout(self.timeouts.for_operation(operation))
            .build()?;

        let value = normalizer::normalize(self.transport.send(request).await)?;
        tracing::debug!(operation = %operation, "AI service call succeeded");
        Ok(value)
    }
}

/// Failure envelope whose message prefers the service's `detail`.
fn detail_envelope(failure: Failure, fallback: &str) -> ResultEnvelope {
    let message = failure
        .detail_message()
        .unwrap_or_else(|| fallback.to_owned());
    ResultEnvelope::failure(message, failure.into_body())
}

fn log_failure(operation: Operation, failure: &Failure) {
    tracing::warn!(
        operation = %operation,
        kind = %failure.kind(),
        status = failure.status().map(|s| s.as_u16()),
        error = %failure.cause(),
        "AI service call failed"
    );
}
