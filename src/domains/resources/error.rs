use thiserror::Error;

use crate::github::GithubError;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("invalid resource URI: {0}")]
    InvalidUri(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("malformed file content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("github api error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error(transparent)]
    Github(#[from] GithubError),
}

impl ResourceError {
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
