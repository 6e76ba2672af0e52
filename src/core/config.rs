//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that is
//! populated once at startup from environment variables, falling back to
//! defaults. The resulting `Config` is immutable for the lifetime of the
//! server.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// GitHub API connection configuration.
    pub github: GithubConfig,

    /// Tool exposure configuration (include/exclude lists, read-only mode).
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the GitHub API connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token used as a bearer token on every request.
    /// Without it, requests are unauthenticated and heavily rate-limited.
    pub token: Option<String>,

    /// GitHub Enterprise Server hostname. When unset, api.github.com is used.
    pub host: Option<String>,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .finish()
    }
}

/// Configuration controlling which tools a server instance exposes.
///
/// The raw comma-separated lists are kept as-is here; parsing into sets
/// happens in `domains::tools::filter` when the catalog is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Comma-separated list of tool names to hide from the catalog.
    pub exclude_tools: String,

    /// Comma-separated list of tool names to expose. When non-empty, this
    /// list is authoritative and `exclude_tools` is ignored.
    pub include_tools: String,

    /// When true, mutating tools are never registered.
    pub read_only: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            host: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "github-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            github: GithubConfig::default(),
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `GITHUB_PERSONAL_ACCESS_TOKEN`, `GITHUB_HOST`,
    /// `GITHUB_EXCLUDE_TOOLS`, `GITHUB_INCLUDE_TOOLS`, `GITHUB_READ_ONLY`,
    /// `MCP_SERVER_NAME` and `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(token) = std::env::var("GITHUB_PERSONAL_ACCESS_TOKEN") {
            if !token.is_empty() {
                config.github.token = Some(token);
                info!("GitHub token loaded from environment");
            }
        }

        if let Ok(host) = std::env::var("GITHUB_HOST") {
            if !host.is_empty() {
                config.github.host = Some(host);
                info!("GitHub Enterprise host set to {:?}", config.github.host);
            }
        }

        if let Ok(exclude) = std::env::var("GITHUB_EXCLUDE_TOOLS") {
            config.tools.exclude_tools = exclude;
        }

        if let Ok(include) = std::env::var("GITHUB_INCLUDE_TOOLS") {
            config.tools.include_tools = include;
        }

        if let Ok(read_only) = std::env::var("GITHUB_READ_ONLY") {
            config.tools.read_only = matches!(
                read_only.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if config.github.token.is_none() {
            warn!(
                "GITHUB_PERSONAL_ACCESS_TOKEN not set. Requests to the GitHub \
                 API will be unauthenticated and subject to low rate limits."
            );
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "GITHUB_PERSONAL_ACCESS_TOKEN",
            "GITHUB_HOST",
            "GITHUB_EXCLUDE_TOOLS",
            "GITHUB_INCLUDE_TOOLS",
            "GITHUB_READ_ONLY",
        ] {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_token_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("GITHUB_PERSONAL_ACCESS_TOKEN", "ghp_test_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.github.token.as_deref(), Some("ghp_test_12345"));
        clear_env();
    }

    #[test]
    fn test_tool_lists_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("GITHUB_EXCLUDE_TOOLS", "create_issue, fork_repository");
            std::env::set_var("GITHUB_READ_ONLY", "true");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.exclude_tools, "create_issue, fork_repository");
        assert!(config.tools.read_only);
        clear_env();
    }

    #[test]
    fn test_read_only_defaults_off() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        let config = Config::from_env();
        assert!(!config.tools.read_only);
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let github = GithubConfig {
            token: Some("super_secret_token".to_string()),
            host: None,
        };
        let debug_str = format!("{:?}", github);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
