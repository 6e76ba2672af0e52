//! Thin HTTP client for the GitHub REST API.
//!
//! The client is deliberately narrow: it knows how to send authenticated
//! requests to the API and hand back the raw status and body. Interpreting
//! the response (success payload vs. domain failure) is the caller's job,
//! so that "GitHub said no" and "we could not ask GitHub" stay distinct.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use super::error::GithubError;
use crate::core::config::GithubConfig;

/// Default API base for github.com.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// API version header sent with every request.
const API_VERSION: &str = "2022-11-28";

/// A completed API exchange: HTTP status plus the raw response body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub status: u16,

    /// Raw response body, usually JSON.
    pub body: String,
}

impl ApiResponse {
    /// Whether the response carries a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, GithubError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Client for the GitHub REST API.
///
/// `reqwest::Client` is internally reference-counted, so this type is cheap
/// to clone and safe to share across concurrently running tool handlers.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    /// Create a new client from the GitHub configuration.
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("github-mcp-server/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            api_base: api_base_for(config.host.as_deref()),
            token: config.token.clone(),
        })
    }

    /// The resolved API base URL (no trailing slash).
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Send a GET request. Query pairs with empty values are skipped.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, GithubError> {
        let url = self.url(path);
        let pairs: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        let request = self.http.get(&url).query(&pairs);
        self.send(request, &url).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, GithubError> {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.send(request, &url).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse, GithubError> {
        let url = self.url(path);
        let request = self.http.patch(&url).json(body);
        self.send(request, &url).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, GithubError> {
        let url = self.url(path);
        let request = self.http.put(&url).json(body);
        self.send(request, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<ApiResponse, GithubError> {
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GithubError::request(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(GithubError::Body)?;

        debug!("GitHub API {} -> {}", url, status);

        Ok(ApiResponse { status, body })
    }
}

/// Resolve the API base URL for an optional GitHub Enterprise host.
fn api_base_for(host: Option<&str>) -> String {
    match host {
        None | Some("") => DEFAULT_API_BASE.to_string(),
        Some(host) => {
            let host = host
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            if host == "github.com" || host == "api.github.com" {
                DEFAULT_API_BASE.to_string()
            } else {
                format!("https://{host}/api/v3")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(host: Option<&str>) -> GithubClient {
        GithubClient::new(&GithubConfig {
            token: None,
            host: host.map(String::from),
        })
        .unwrap()
    }

    #[test]
    fn test_default_api_base() {
        assert_eq!(client_for(None).api_base(), "https://api.github.com");
        assert_eq!(client_for(Some("")).api_base(), "https://api.github.com");
    }

    #[test]
    fn test_github_com_host_maps_to_default() {
        assert_eq!(
            client_for(Some("github.com")).api_base(),
            "https://api.github.com"
        );
    }

    #[test]
    fn test_enterprise_api_base() {
        assert_eq!(
            client_for(Some("ghe.example.com")).api_base(),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            client_for(Some("https://ghe.example.com/")).api_base(),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn test_api_response_success() {
        let ok = ApiResponse {
            status: 200,
            body: "{}".to_string(),
        };
        let not_found = ApiResponse {
            status: 404,
            body: "{\"message\":\"Not Found\"}".to_string(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_api_response_json() {
        let resp = ApiResponse {
            status: 200,
            body: "{\"id\": 42}".to_string(),
        };
        let value = resp.json().unwrap();
        assert_eq!(value["id"], 42);
    }
}
