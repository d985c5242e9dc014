use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Used when a failure is built with a blank message
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request to the AI service failed";

/// Uniform outcome of a gateway operation.
///
/// Serializes to `{"success", "data", "message", "errors"}` so it can be handed
/// straight to a JSON response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope {
    Success {
        data: Value,
        message: String,
    },
    Failure {
        message: String,
        /// Raw error body from the AI service, when it could be decoded
        errors: Option<Value>,
    },
}

impl ResultEnvelope {
    #[must_use]
    pub fn success(data: Value, message: impl Into<String>) -> Self {
        ResultEnvelope::Success {
            data,
            message: message.into(),
        }
    }

    /// Failure envelope. A blank `message` is replaced by
    /// [`DEFAULT_FAILURE_MESSAGE`] so a failure always says something.
    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Option<Value>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_owned()
        } else {
            message
        };
        ResultEnvelope::Failure { message, errors }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success { .. })
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            ResultEnvelope::Success { data, .. } => Some(data),
            ResultEnvelope::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ResultEnvelope::Success { message, .. } | ResultEnvelope::Failure { message, .. } => {
                message
            }
        }
    }

    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        match self {
            ResultEnvelope::Success { .. } => None,
            ResultEnvelope::Failure { errors, .. } => errors.as_ref(),
        }
    }

    /// Deserialize the success payload into a typed view.
    ///
    /// Returns `None` for a failure envelope.
    ///
    /// # Errors
    /// Returns the deserialization error if the payload does not match `T`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data().map(|data| T::deserialize(data))
    }

    /// Convert into a `Result`, keeping the failure message and errors.
    ///
    /// # Errors
    /// Returns `(message, errors)` for a failure envelope.
    pub fn into_result(self) -> Result<Value, (String, Option<Value>)> {
        match self {
            ResultEnvelope::Success { data, .. } => Ok(data),
            ResultEnvelope::Failure { message, errors } => Err((message, errors)),
        }
    }
}

#[derive(Serialize)]
struct Wire<'a> {
    success: bool,
    data: Option<&'a Value>,
    message: &'a str,
    errors: Option<&'a Value>,
}

impl Serialize for ResultEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Wire {
            success: self.is_success(),
            data: self.data(),
            message: self.message(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}
