//! Repository content resources.
//!
//! `repo://` URIs address files and directories in a GitHub repository at an
//! optional git reference. Reading one resolves the URI to the contents API
//! and returns either the decoded file or the directory listing.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rmcp::model::{ReadResourceResult, ResourceContents, ResourceTemplate};
use serde_json::Value;
use tracing::info;

use super::error::ResourceError;
use super::registry::repo_content_templates;
use crate::github::GithubClient;

/// A `repo://` URI resolved into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContentRef {
    pub owner: String,
    pub repo: String,
    /// Git reference as the contents API expects it (`refs/heads/main`,
    /// a commit SHA, ...). `None` means the default branch.
    pub reference: Option<String>,
    pub path: String,
}

/// Serves repository content behind the `repo://` templates.
pub struct RepoResourceService {
    client: Arc<GithubClient>,
}

impl RepoResourceService {
    pub fn new(client: Arc<GithubClient>) -> Self {
        Self { client }
    }

    pub fn list_templates(&self) -> Vec<ResourceTemplate> {
        repo_content_templates()
    }

    /// Read the file or directory a `repo://` URI points at.
    pub async fn read(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content_ref = parse_repo_uri(uri)?;

        info!(
            "Reading repository content {}/{}:{}",
            content_ref.owner, content_ref.repo, content_ref.path
        );

        let path = format!(
            "repos/{}/{}/contents/{}",
            content_ref.owner, content_ref.repo, content_ref.path
        );
        let query = [("ref", content_ref.reference.unwrap_or_default())];
        let resp = self.client.get(&path, &query).await?;

        if resp.status == 404 {
            return Err(ResourceError::not_found(uri));
        }
        if !resp.is_success() {
            return Err(ResourceError::Api {
                status: resp.status,
                body: resp.body,
            });
        }

        let payload: Value = resp.json()?;
        let contents = match &payload {
            // A single file carries its content inline, base64-encoded.
            Value::Object(fields) if fields.contains_key("content") => {
                file_contents(uri, fields)?
            }
            // A directory comes back as an array of entries; pass the
            // listing through as JSON.
            _ => ResourceContents::text(payload.to_string(), uri),
        };

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

/// Decode a file payload. Text files become text resources; anything that
/// is not valid UTF-8 stays base64 as a blob.
fn file_contents(
    uri: &str,
    fields: &serde_json::Map<String, Value>,
) -> Result<ResourceContents, ResourceError> {
    let encoded: String = fields
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = BASE64.decode(&encoded)?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(ResourceContents::text(text, uri)),
        Err(_) => Ok(ResourceContents::BlobResourceContents {
            uri: uri.to_string(),
            mime_type: Some("application/octet-stream".to_string()),
            blob: encoded,
            meta: None,
        }),
    }
}

/// Parse a `repo://` URI into owner, repo, reference and path.
///
/// Accepted shapes, mirroring the published templates:
///   repo://{owner}/{repo}/contents{/path*}
///   repo://{owner}/{repo}/refs/heads/{branch}/contents{/path*}
///   repo://{owner}/{repo}/sha/{sha}/contents{/path*}
///   repo://{owner}/{repo}/refs/tags/{tag}/contents{/path*}
///   repo://{owner}/{repo}/refs/pull/{prNumber}/head/contents{/path*}
pub fn parse_repo_uri(uri: &str) -> Result<RepoContentRef, ResourceError> {
    let rest = uri
        .strip_prefix("repo://")
        .ok_or_else(|| ResourceError::invalid_uri(uri))?;

    let segments: Vec<&str> = rest.split('/').collect();
    let [owner, repo, tail @ ..] = segments.as_slice() else {
        return Err(ResourceError::invalid_uri(uri));
    };
    if owner.is_empty() || repo.is_empty() {
        return Err(ResourceError::invalid_uri(uri));
    }

    let (reference, tail) = match tail {
        ["contents", ..] => (None, &tail[1..]),
        ["refs", "heads", branch, "contents", ..] => {
            (Some(format!("refs/heads/{branch}")), &tail[4..])
        }
        ["sha", sha, "contents", ..] => (Some((*sha).to_string()), &tail[3..]),
        ["refs", "tags", tag, "contents", ..] => {
            (Some(format!("refs/tags/{tag}")), &tail[4..])
        }
        ["refs", "pull", number, "head", "contents", ..] => {
            (Some(format!("refs/pull/{number}/head")), &tail[5..])
        }
        _ => return Err(ResourceError::invalid_uri(uri)),
    };

    Ok(RepoContentRef {
        owner: (*owner).to_string(),
        repo: (*repo).to_string(),
        reference,
        path: tail.join("/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_branch_uri() {
        let parsed = parse_repo_uri("repo://octocat/hello/contents/src/main.rs").unwrap();
        assert_eq!(parsed.owner, "octocat");
        assert_eq!(parsed.repo, "hello");
        assert_eq!(parsed.reference, None);
        assert_eq!(parsed.path, "src/main.rs");
    }

    #[test]
    fn test_parse_branch_uri() {
        let parsed = parse_repo_uri("repo://o/r/refs/heads/dev/contents/README.md").unwrap();
        assert_eq!(parsed.reference.as_deref(), Some("refs/heads/dev"));
        assert_eq!(parsed.path, "README.md");
    }

    #[test]
    fn test_parse_sha_uri() {
        let parsed = parse_repo_uri("repo://o/r/sha/abc123/contents/a/b.txt").unwrap();
        assert_eq!(parsed.reference.as_deref(), Some("abc123"));
        assert_eq!(parsed.path, "a/b.txt");
    }

    #[test]
    fn test_parse_tag_uri() {
        let parsed = parse_repo_uri("repo://o/r/refs/tags/v1.0.0/contents").unwrap();
        assert_eq!(parsed.reference.as_deref(), Some("refs/tags/v1.0.0"));
        assert_eq!(parsed.path, "");
    }

    #[test]
    fn test_parse_pull_request_uri() {
        let parsed = parse_repo_uri("repo://o/r/refs/pull/42/head/contents/lib.rs").unwrap();
        assert_eq!(parsed.reference.as_deref(), Some("refs/pull/42/head"));
        assert_eq!(parsed.path, "lib.rs");
    }

    #[test]
    fn test_parse_directory_uri_without_path() {
        let parsed = parse_repo_uri("repo://o/r/contents").unwrap();
        assert_eq!(parsed.path, "");
    }

    #[test]
    fn test_parse_rejects_bad_uris() {
        assert!(parse_repo_uri("file:///etc/passwd").is_err());
        assert!(parse_repo_uri("repo://only-owner").is_err());
        assert!(parse_repo_uri("repo://o/r").is_err());
        assert!(parse_repo_uri("repo://o/r/branches/main").is_err());
        assert!(parse_repo_uri("repo:///r/contents").is_err());
    }

    #[test]
    fn test_file_contents_decodes_text() {
        let payload = serde_json::json!({
            "type": "file",
            "content": "aGVs\nbG8=",
        });
        let contents = file_contents("repo://o/r/contents/a.txt", payload.as_object().unwrap())
            .unwrap();
        match contents {
            ResourceContents::TextResourceContents { text, .. } => assert_eq!(text, "hello"),
            other => panic!("expected text contents, got {other:?}"),
        }
    }

    #[test]
    fn test_file_contents_keeps_binary_as_blob() {
        let payload = serde_json::json!({
            "type": "file",
            "content": BASE64.encode([0u8, 159, 146, 150]),
        });
        let contents = file_contents("repo://o/r/contents/a.bin", payload.as_object().unwrap())
            .unwrap();
        assert!(matches!(
            contents,
            ResourceContents::BlobResourceContents { .. }
        ));
    }
}
