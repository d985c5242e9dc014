//! AI Gateway Client
//!
//! Talks to the AI inference service (document indexing + retrieval-augmented
//! chat) over HTTP and hides its wire details from application code.
//!
//! Four operations, each with its own timeout:
//!
//! | Operation | Remote call | Result |
//! |---|---|---|
//! | [`GatewayClient::upload_document`] | `POST /admin/upload` (multipart) | [`ResultEnvelope`] |
//! | [`GatewayClient::chat`] | `POST /chat` | [`ResultEnvelope`] |
//! | [`GatewayClient::get_status`] | `GET /admin/status` | [`ResultEnvelope`] |
//! | [`GatewayClient::health_check`] | `GET /health` | `bool` |
//!
//! No operation returns an error or panics. Network faults, timeouts, error
//! statuses and undecodable bodies are classified by [`normalize`] and turned
//! into a failure envelope.
//!
//! # Example
//!
//! ```no_run
//! use ai_gateway_client::{AiGatewayConfig, ChatAnswer, GatewayClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GatewayClient::from_config(AiGatewayConfig::from_env()?)?;
//!
//! if !client.health_check().await {
//!     return Ok(());
//! }
//!
//! let envelope = client.ask("Which UMKM sell coffee?").await;
//! match envelope.decode_data::<ChatAnswer>() {
//!     Some(Ok(answer)) => println!("{}", answer.answer),
//!     Some(Err(e)) => eprintln!("unexpected payload: {e}"),
//!     None => eprintln!("{}", envelope.message()),
//! }
//! # Ok(())
//! # }
//! ```

mod body;
mod client;
mod config;
mod envelope;
mod error;
mod models;
mod normalizer;
mod request;
mod response;
mod timeouts;
mod transport;

// Re-export public API
pub use body::{Body, FilePart};
pub use client::{
    CHAT_FAILURE_MESSAGE, CHAT_PATH, CHAT_SUCCESS_MESSAGE, GatewayClient, HEALTH_PATH,
    STATUS_FAILURE_MESSAGE, STATUS_PATH, STATUS_SUCCESS_MESSAGE, UPLOAD_FAILURE_MESSAGE,
    UPLOAD_FIELD, UPLOAD_PATH, UPLOAD_SUCCESS_MESSAGE,
};
pub use config::{AiGatewayConfig, DEFAULT_BASE_URL, ENV_PREFIX};
pub use envelope::{DEFAULT_FAILURE_MESSAGE, ResultEnvelope};
pub use error::{ConfigError, TransportError};
pub use models::{
    ChatAnswer, ChatRequest, IndexState, IndexStatus, Intent, Recommendation, UploadReceipt,
    UploadRequest,
};
pub use normalizer::{Failure, FailureKind, normalize};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use timeouts::{Operation, TimeoutPolicy};
pub use transport::{ReqwestTransport, Transport};

// Re-export commonly used types from dependencies
pub use http::{Method, StatusCode};
