//! Tool-specific error types.

use thiserror::Error;

/// Errors raised while validating the arguments of a tool call.
///
/// These are produced synchronously by the accessors in
/// [`super::arguments`], before any GitHub request is issued. They are
/// reported to the calling agent as tool error results rather than
/// protocol faults: a bad argument is the caller's problem, not ours.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required parameter is absent, or present but zero-valued.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter is present but has the wrong type.
    #[error("parameter {name} is not of type {expected}, is {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: String,
    },
}

impl ToolError {
    /// Create a new "missing parameter" error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new "type mismatch" error.
    pub fn mismatch(
        name: impl Into<String>,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            actual: actual.into(),
        }
    }
}
