//! Error types and handling for the MCP server.
//!
//! Runtime failures are reported through the MCP protocol itself (tool
//! error results and `McpError`), so the top-level error type only covers
//! what can go wrong before the server is serving: construction and
//! startup.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for server construction.
#[derive(Debug, Error)]
pub enum Error {
    /// The GitHub API client could not be set up.
    #[error("GitHub error: {0}")]
    Github(#[from] crate::github::GithubError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubError;

    #[test]
    fn test_github_error_converts_to_top_level() {
        fn parse() -> Result<serde_json::Value> {
            let value = serde_json::from_str("{").map_err(GithubError::from)?;
            Ok(value)
        }

        let err = parse().unwrap_err();
        assert!(matches!(err, Error::Github(_)));
        assert!(err.to_string().starts_with("GitHub error:"));
    }
}
