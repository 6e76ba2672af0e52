//! GitHub MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes
//! the GitHub REST API as a catalog of tools.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **github**: Thin HTTP client for the GitHub REST API
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: argument extraction, capability filtering, and the tool catalog
//!   - **resources**: repository content resource templates
//!
//! # Example
//!
//! ```rust,no_run
//! use github_mcp_server::{core::Config, core::GithubMcpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = GithubMcpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod github;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, GithubMcpServer, Result};
pub use github::GithubClient;
