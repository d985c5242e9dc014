use bytes::Bytes;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::TransportError;

/// A single file attached to a multipart form.
///
/// The file is read by the transport at send time, so building a request never
/// touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    field: String,
    path: PathBuf,
    file_name: String,
}

impl FilePart {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            file_name: file_name.into(),
        }
    }

    /// Form field name
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Local path of the file to send
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name announced in the part's `Content-Disposition`
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// HTTP request body abstraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// Empty body
    #[default]
    Empty,
    /// Buffered bytes
    Bytes(Bytes),
    /// `multipart/form-data` with one file field
    Multipart(FilePart),
}

impl Body {
    /// Create a body from a JSON-serializable value
    ///
    /// # Errors
    /// Returns [`TransportError::Serialization`] if the value cannot be encoded.
    pub fn from_json<T: Serialize>(value: &T) -> Result<Self, TransportError> {
        let json = serde_json::to_vec(value)?;
        Ok(Body::Bytes(Bytes::from(json)))
    }
}
