//! Errors raised while reading or writing configuration values

/// Failure to address or convert a value inside a `DynamicValue`
#[derive(Debug, thiserror::Error)]
pub enum TfplugError {
    #[error("attribute {0} is not set")]
    AttributeNotFound(String),

    #[error("invalid attribute path: {0}")]
    InvalidPath(String),

    #[error("expected a {expected} value, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, TfplugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TfplugError::TypeMismatch {
            expected: "string".to_string(),
            actual: "null".to_string(),
        };
        assert_eq!(err.to_string(), "expected a string value, found null");
        assert_eq!(
            TfplugError::AttributeNotFound("timeout".to_string()).to_string(),
            "attribute timeout is not set"
        );
    }
}
