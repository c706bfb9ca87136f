//! Error types for the upload guard.
//!
//! - [`GuardError`] - every failure the guard can report, from configuration
//!   loading to DOM lookups
//!
//! The browser side treats most of these as log-and-continue: the guard is a
//! best-effort enhancement and must never break the host page.

use thiserror::Error;

/// Errors raised while configuring or driving the guard.
#[derive(Debug, Error)]
pub enum GuardError {
    /// A configuration field holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    /// Configuration JSON could not be parsed or rendered.
    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read or written.
    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A selector matched nothing in the document.
    #[error("No element matches selector '{0}'")]
    MissingElement(String),

    /// The DOM rejected an operation.
    #[error("DOM error: {0}")]
    Dom(String),

    /// The readiness gate stopped polling before the page was ready.
    #[error("Gave up after {attempts} attempts, still missing: {missing:?}")]
    NotReady { attempts: u32, missing: Vec<String> },
}

impl GuardError {
    /// Shorthand for [`GuardError::InvalidConfig`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        GuardError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_format() {
        let err = GuardError::invalid("pollIntervalMs", "must be greater than zero");
        let msg = err.to_string();
        assert!(msg.contains("pollIntervalMs"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GuardError = json_err.into();
        assert!(err.to_string().starts_with("Configuration JSON error"));
    }

    #[test]
    fn test_not_ready_lists_missing() {
        let err = GuardError::NotReady {
            attempts: 3,
            missing: vec!["#upload-tab".into()],
        };
        assert!(err.to_string().contains("#upload-tab"));
        assert!(err.to_string().contains('3'));
    }
}
