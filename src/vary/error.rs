//! Error definitions for `Vary` rewriting.

use thiserror::Error;

/// Errors that can occur while rewriting the `Vary` header.
///
/// None of these reach the caller of [`process_response`]; the
/// post-processor logs them and leaves the header as it was.
///
/// [`process_response`]: crate::vary::process_response
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaryError {
    /// The existing `Vary` value contains bytes outside visible ASCII.
    #[error("existing Vary header is not valid header text")]
    NonTextValue,

    /// The rebuilt value is not a legal header value.
    #[error("cannot build Vary header from {value:?}")]
    InvalidValue { value: String },
}

impl VaryError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            VaryError::NonTextValue => "non_text_value",
            VaryError::InvalidValue { .. } => "invalid_value",
        }
    }
}

/// Result type for `Vary` operations.
pub type VaryResult<T> = Result<T, VaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaryError::InvalidValue {
            value: "Cookie\n".into(),
        };
        assert!(err.to_string().contains("Cookie\\n"));
        assert_eq!(err.kind(), "invalid_value");
        assert_eq!(VaryError::NonTextValue.kind(), "non_text_value");
    }
}
