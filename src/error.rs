//! Error types shared by route registration and request dispatch.
//!
//! Registration-time failures (`UnsupportedType`, `InvalidCommand`,
//! `Serialize`) abort [`crate::App::build`]. Request-time failures carry an HTTP
//! status through [`Error::status`] and are rendered by the server's single JSON
//! error path.

use http::StatusCode;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A query value could not be converted to the parameter's declared type.
    #[error("parameter '{parameter}': cannot convert {value:?} to {expected}")]
    TypeMismatch {
        parameter: String,
        value: String,
        expected: &'static str,
    },

    /// A parameter type has no schema mapping.
    #[error("parameter '{parameter}': type {type_name} has no schema mapping")]
    UnsupportedType {
        parameter: String,
        type_name: String,
    },

    /// The command's own logic failed (returned an error or panicked).
    #[error("command '{command}' failed: {message}")]
    CallbackFailure {
        command: String,
        message: String,
        /// Output recorded before the failure.
        stdout: String,
    },

    #[error("invalid command tree: {0}")]
    InvalidCommand(String),

    #[error("unknown output style {0:?}, expected \"plain\" or \"html\"")]
    InvalidStyle(String),

    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl Error {
    /// HTTP status the error maps to when it escapes a request.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::TypeMismatch { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable name of the variant, used as the `error` field of JSON bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::TypeMismatch { .. } => "TypeMismatch",
            Error::UnsupportedType { .. } => "UnsupportedType",
            Error::CallbackFailure { .. } => "CallbackFailure",
            Error::InvalidCommand(_) => "InvalidCommand",
            Error::InvalidStyle(_) => "InvalidStyle",
            Error::Serialize(_) => "Serialize",
        }
    }

    /// JSON body for the error response.
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        if let Error::CallbackFailure { stdout, .. } = self {
            body["stdout"] = serde_json::Value::String(stdout.clone());
        }
        body
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let mismatch = Error::TypeMismatch {
            parameter: "count".into(),
            value: "abc".into(),
            expected: "integer",
        };
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

        let failure = Error::CallbackFailure {
            command: "hello".into(),
            message: "boom".into(),
            stdout: "partial".into(),
        };
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_callback_failure_body_carries_stdout() {
        let failure = Error::CallbackFailure {
            command: "hello".into(),
            message: "boom".into(),
            stdout: "partial".into(),
        };
        let body = failure.to_json();
        assert_eq!(body["error"], "CallbackFailure");
        assert_eq!(body["stdout"], "partial");
        assert!(body["message"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_mismatch_body_has_no_stdout() {
        let mismatch = Error::TypeMismatch {
            parameter: "count".into(),
            value: "abc".into(),
            expected: "integer",
        };
        let body = mismatch.to_json();
        assert_eq!(body["error"], "TypeMismatch");
        assert!(body.get("stdout").is_none());
    }
}
