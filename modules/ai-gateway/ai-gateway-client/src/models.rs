//! Request inputs and typed views of the AI service payloads.
//!
//! The client passes response bodies through as raw JSON. The views below are
//! for callers that want typed access via
//! [`ResultEnvelope::decode_data`](crate::ResultEnvelope::decode_data).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Name used when the upload path has no final component
const FALLBACK_FILE_NAME: &str = "upload";

/// Document to send to `POST /admin/upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    pub file_name: Option<String>,
}

impl UploadRequest {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            file_name: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Explicit file name, or the basename of `file_path`
    #[must_use]
    pub fn resolved_file_name(&self) -> String {
        self.file_name
            .clone()
            .or_else(|| basename(&self.file_path))
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_owned())
    }
}

fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Body of `POST /chat`.
///
/// Callers validate the question (non-empty, at most
/// [`ChatRequest::MAX_QUESTION_CHARS`] characters) before it reaches the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    pub const MAX_QUESTION_CHARS: usize = 1000;

    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Response of `POST /admin/upload`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    pub status: String,
    #[serde(default)]
    pub added_chunks: u64,
}

/// State of the remote vector index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    Missing,
    Empty,
    Ready,
    #[serde(other)]
    Unknown,
}

/// Response of `GET /admin/status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexStatus {
    pub index: IndexState,
    #[serde(default)]
    pub vectors: u64,
    #[serde(default)]
    pub pdf_files_uploaded: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl IndexStatus {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.index == IndexState::Ready && self.vectors > 0
    }
}

/// Intent the service assigned to a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ListUmkm,
    Recommend,
    #[default]
    #[serde(other)]
    Qa,
}

/// A single product recommendation
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    /// Business offering the item
    pub umkm: String,
    pub menu: String,
    pub reason: String,
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChatAnswer {
    pub intent: Intent,
    pub answer: String,
    /// Businesses mentioned in the indexed documents
    pub umkm_list: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    /// Retrieval diagnostics the service attaches to empty answers
    pub debug: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_name_defaults_to_basename() {
        let request = UploadRequest::new("/var/www/storage/app/menus/warung-bu-sri.pdf");
        assert_eq!(request.resolved_file_name(), "warung-bu-sri.pdf");
    }

    #[test]
    fn test_explicit_file_name_wins() {
        let request = UploadRequest::new("/tmp/phpA1b2C3").with_file_name("catalog.pdf");
        assert_eq!(request.resolved_file_name(), "catalog.pdf");
    }

    #[test]
    fn test_path_without_basename_uses_fallback() {
        let request = UploadRequest::new("/");
        assert_eq!(request.resolved_file_name(), "upload");
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let body = serde_json::to_value(ChatRequest::new("menu apa yang murah?")).unwrap();
        assert_eq!(body, json!({"question": "menu apa yang murah?"}));
    }

    #[test]
    fn test_index_status_ready() {
        let status: IndexStatus = serde_json::from_value(json!({
            "index": "ready",
            "vectors": 128,
            "pdf_files_uploaded": 3,
            "message": "Database ready"
        }))
        .unwrap();
        assert!(status.is_ready());
        assert_eq!(status.pdf_files_uploaded, Some(3));
    }

    #[test]
    fn test_index_status_missing() {
        let status: IndexStatus =
            serde_json::from_value(json!({"index": "missing", "vectors": 0})).unwrap();
        assert_eq!(status.index, IndexState::Missing);
        assert!(!status.is_ready());
        assert!(status.pdf_files_uploaded.is_none());
    }

    #[test]
    fn test_unknown_index_state() {
        let status: IndexStatus =
            serde_json::from_value(json!({"index": "rebuilding"})).unwrap();
        assert_eq!(status.index, IndexState::Unknown);
    }

    #[test]
    fn test_chat_answer_recommend() {
        let answer: ChatAnswer = serde_json::from_value(json!({
            "intent": "recommend",
            "answer": "Coba ini",
            "umkm_list": [],
            "recommendations": [
                {"umkm": "Warung Bu Sri", "menu": "Nasi Pecel", "reason": "murah"}
            ]
        }))
        .unwrap();
        assert_eq!(answer.intent, Intent::Recommend);
        assert_eq!(answer.recommendations[0].menu, "Nasi Pecel");
        assert!(answer.debug.is_none());
    }

    #[test]
    fn test_chat_answer_tolerates_partial_payload() {
        let answer: ChatAnswer =
            serde_json::from_value(json!({"intent": "smalltalk", "answer": "hi"})).unwrap();
        assert_eq!(answer.intent, Intent::Qa);
        assert!(answer.umkm_list.is_empty());
        assert!(answer.recommendations.is_empty());
    }
}
