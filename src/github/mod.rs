//! GitHub REST API client.
//!
//! A thin wrapper around `reqwest` that handles authentication, the API
//! base URL (github.com or GitHub Enterprise) and the standard headers.
//! Everything above it - argument validation, capability filtering, result
//! shaping - lives in `domains::tools`.

mod client;
mod error;

pub use client::{ApiResponse, GithubClient};
pub use error::GithubError;
