//! Error taxonomy and the structured error envelope
//!
//! Every failure that reaches the dispatch boundary is converted into an
//! [`ErrorEnvelope`] with a stable wire code. No panic or raw error is
//! allowed to cross the surface unconverted.

use serde::Serialize;

/// Typed failure produced anywhere in the recognition pipeline
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    /// A required argument is missing or has the wrong type
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied bytes do not decode to an image
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The recognition backend itself failed
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend reported no result set at all
    #[error("no text recognition results")]
    NoResults,

    /// No recognition backend exists for the running platform
    #[error("text recognition is not supported on this platform")]
    UnsupportedPlatform,

    /// The requested operation is not part of the surface
    #[error("operation not implemented: {0}")]
    NotImplemented(String),

    /// Anything unexpected caught at the dispatch boundary
    #[error("processing error: {0}")]
    Processing(String),
}

impl RecognitionError {
    /// Stable wire code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            RecognitionError::InvalidArgument(_) => "INVALID_ARGUMENT",
            RecognitionError::InvalidImage(_) => "INVALID_IMAGE",
            RecognitionError::Backend(_) => "BACKEND_ERROR",
            RecognitionError::NoResults => "NO_RESULTS",
            RecognitionError::UnsupportedPlatform => "UNSUPPORTED_PLATFORM",
            RecognitionError::NotImplemented(_) => "NOT_IMPLEMENTED",
            RecognitionError::Processing(_) => "PROCESSING_ERROR",
        }
    }
}

/// Structured error returned to callers of the dispatch façade
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// One of the stable codes from [`RecognitionError::code`]
    pub code: String,
    /// Human-readable description of the failure
    pub message: String,
    /// Optional backend-specific details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<RecognitionError> for ErrorEnvelope {
    fn from(err: RecognitionError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(RecognitionError::InvalidArgument("x".into()).code(), "INVALID_ARGUMENT");
        assert_eq!(RecognitionError::InvalidImage("x".into()).code(), "INVALID_IMAGE");
        assert_eq!(RecognitionError::Backend("x".into()).code(), "BACKEND_ERROR");
        assert_eq!(RecognitionError::NoResults.code(), "NO_RESULTS");
        assert_eq!(RecognitionError::UnsupportedPlatform.code(), "UNSUPPORTED_PLATFORM");
        assert_eq!(RecognitionError::NotImplemented("x".into()).code(), "NOT_IMPLEMENTED");
        assert_eq!(RecognitionError::Processing("x".into()).code(), "PROCESSING_ERROR");
    }

    #[test]
    fn test_envelope_from_error() {
        let envelope = ErrorEnvelope::from(RecognitionError::InvalidImage("bad magic".into()));
        assert_eq!(envelope.code, "INVALID_IMAGE");
        assert!(envelope.message.contains("bad magic"));
        assert!(envelope.details.is_none());
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let envelope = ErrorEnvelope::from(RecognitionError::NoResults);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["code"], "NO_RESULTS");
        assert!(json.get("details").is_none());
    }
}
