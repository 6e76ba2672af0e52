//! Repository tools.
//!
//! Read tools: `search_repositories`, `get_file_contents`, `list_commits`.
//! Mutating tools: `create_or_update_file`, `create_repository`,
//! `fork_repository`, `create_branch`, `push_files`.
//!
//! `create_branch` and `push_files` are multi-step operations over the git
//! data API: every intermediate response is checked before the next request
//! is issued, and a non-success status at any step surfaces as a tool error
//! naming that step.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{
    api_result, pagination, reject, route_for, set_string, tool, transport_error, with_pagination,
};
use crate::domains::tools::arguments::{
    ArgumentBag, optional_bool, optional_string, required_string,
};
use crate::domains::tools::error::ToolError;
use crate::github::GithubClient;

/// Extract a string field from a parsed response body, failing hard when
/// absent: a successful API response without it means we can no longer
/// trust the exchange.
fn json_str(value: &Value, pointer: &str) -> Result<String, McpError> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            McpError::internal_error(format!("response is missing {pointer}"), None)
        })
}

// ============================================================================
// search_repositories
// ============================================================================

/// Search repositories across GitHub.
pub struct SearchRepositoriesTool;

impl SearchRepositoriesTool {
    pub const NAME: &'static str = "search_repositories";
    pub const DESCRIPTION: &'static str =
        "Search for GitHub repositories using the repository search syntax.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            with_pagination(json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search query"}
                },
                "required": ["query"]
            })),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let (query, page, per_page) = match (required_string(args, "query"), pagination(args)) {
            (Ok(q), Ok((page, per_page))) => (q, page, per_page),
            (Err(e), _) | (_, Err(e)) => return reject(e),
        };

        info!("Searching repositories: {}", query);

        let query = [
            ("q", query),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        let resp = client
            .get("search/repositories", &query)
            .await
            .map_err(transport_error)?;
        api_result(resp, "search repositories")
    }
}

// ============================================================================
// get_file_contents
// ============================================================================

/// Fetch the contents of a file or directory.
pub struct GetFileContentsTool;

impl GetFileContentsTool {
    pub const NAME: &'static str = "get_file_contents";
    pub const DESCRIPTION: &'static str =
        "Get the contents of a file or directory in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "path": {"type": "string", "description": "Path to the file or directory"},
                    "branch": {"type": "string", "description": "Branch to read from (defaults to the default branch)"}
                },
                "required": ["owner", "repo", "path"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match GetFileContentsParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Fetching contents of {}/{}:{}",
            params.owner, params.repo, params.path
        );

        let path = format!(
            "repos/{}/{}/contents/{}",
            params.owner, params.repo, params.path
        );
        let query = [("ref", params.branch)];
        let resp = client.get(&path, &query).await.map_err(transport_error)?;
        api_result(resp, "get file contents")
    }
}

#[derive(Debug)]
struct GetFileContentsParams {
    owner: String,
    repo: String,
    path: String,
    branch: String,
}

impl GetFileContentsParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            path: required_string(args, "path")?,
            branch: optional_string(args, "branch")?,
        })
    }
}

// ============================================================================
// list_commits
// ============================================================================

/// List commits on a branch.
pub struct ListCommitsTool;

impl ListCommitsTool {
    pub const NAME: &'static str = "list_commits";
    pub const DESCRIPTION: &'static str =
        "Get the list of commits of a branch in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            with_pagination(json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "sha": {"type": "string", "description": "Branch name or commit SHA to start from"}
                },
                "required": ["owner", "repo"]
            })),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match ListCommitsParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        let path = format!("repos/{}/{}/commits", params.owner, params.repo);
        let query = [
            ("sha", params.sha),
            ("page", params.page.to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        let resp = client.get(&path, &query).await.map_err(transport_error)?;
        api_result(resp, "list commits")
    }
}

#[derive(Debug)]
struct ListCommitsParams {
    owner: String,
    repo: String,
    sha: String,
    page: i64,
    per_page: i64,
}

impl ListCommitsParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        let (page, per_page) = pagination(args)?;
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            sha: optional_string(args, "sha")?,
            page,
            per_page,
        })
    }
}

// ============================================================================
// create_or_update_file
// ============================================================================

/// Create or update a single file in a repository.
pub struct CreateOrUpdateFileTool;

impl CreateOrUpdateFileTool {
    pub const NAME: &'static str = "create_or_update_file";
    pub const DESCRIPTION: &'static str =
        "Create or update a single file in a GitHub repository. Updating an existing file requires its blob SHA.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "path": {"type": "string", "description": "Path where to create/update the file"},
                    "content": {"type": "string", "description": "File content (plain text, encoded internally)"},
                    "message": {"type": "string", "description": "Commit message"},
                    "branch": {"type": "string", "description": "Branch to commit to"},
                    "sha": {"type": "string", "description": "Blob SHA of the file being replaced (required for updates)"}
                },
                "required": ["owner", "repo", "path", "content", "message", "branch"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match CreateOrUpdateFileParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Writing {}/{}:{} on {}",
            params.owner, params.repo, params.path, params.branch
        );

        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(params.message));
        body.insert(
            "content".to_string(),
            Value::String(BASE64.encode(params.content.as_bytes())),
        );
        body.insert("branch".to_string(), Value::String(params.branch));
        set_string(&mut body, "sha", params.sha);

        let path = format!(
            "repos/{}/{}/contents/{}",
            params.owner, params.repo, params.path
        );
        let resp = client
            .put(&path, &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "create or update file")
    }
}

#[derive(Debug)]
struct CreateOrUpdateFileParams {
    owner: String,
    repo: String,
    path: String,
    content: String,
    message: String,
    branch: String,
    sha: String,
}

impl CreateOrUpdateFileParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            path: required_string(args, "path")?,
            content: required_string(args, "content")?,
            message: required_string(args, "message")?,
            branch: required_string(args, "branch")?,
            sha: optional_string(args, "sha")?,
        })
    }
}

// ============================================================================
// create_repository
// ============================================================================

/// Create a repository for the authenticated user.
pub struct CreateRepositoryTool;

impl CreateRepositoryTool {
    pub const NAME: &'static str = "create_repository";
    pub const DESCRIPTION: &'static str =
        "Create a new GitHub repository for the authenticated user.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Repository name"},
                    "description": {"type": "string", "description": "Repository description"},
                    "private": {"type": "boolean", "description": "Whether the repository is private"},
                    "auto_init": {"type": "boolean", "description": "Initialize with an empty README"}
                },
                "required": ["name"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match CreateRepositoryParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Creating repository {}", params.name);

        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(params.name));
        set_string(&mut body, "description", params.description);
        body.insert("private".to_string(), Value::Bool(params.private));
        body.insert("auto_init".to_string(), Value::Bool(params.auto_init));

        let resp = client
            .post("user/repos", &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "create repository")
    }
}

#[derive(Debug)]
struct CreateRepositoryParams {
    name: String,
    description: String,
    private: bool,
    auto_init: bool,
}

impl CreateRepositoryParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            name: required_string(args, "name")?,
            description: optional_string(args, "description")?,
            private: optional_bool(args, "private")?,
            auto_init: optional_bool(args, "auto_init")?,
        })
    }
}

// ============================================================================
// fork_repository
// ============================================================================

/// Fork a repository to the authenticated user or an organization.
pub struct ForkRepositoryTool;

impl ForkRepositoryTool {
    pub const NAME: &'static str = "fork_repository";
    pub const DESCRIPTION: &'static str =
        "Fork a GitHub repository to your account or a specified organization.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "organization": {"type": "string", "description": "Organization to fork into (defaults to your account)"}
                },
                "required": ["owner", "repo"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let (owner, repo, organization) = match (
            required_string(args, "owner"),
            required_string(args, "repo"),
            optional_string(args, "organization"),
        ) {
            (Ok(o), Ok(r), Ok(org)) => (o, r, org),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return reject(e),
        };

        info!("Forking {}/{}", owner, repo);

        let mut body = Map::new();
        set_string(&mut body, "organization", organization);

        let path = format!("repos/{owner}/{repo}/forks");
        let resp = client
            .post(&path, &Value::Object(body))
            .await
            .map_err(transport_error)?;
        // Forking is asynchronous on GitHub's side; 202 is the normal answer.
        api_result(resp, "fork repository")
    }
}

// ============================================================================
// create_branch
// ============================================================================

/// Create a branch from another branch (or the default branch).
pub struct CreateBranchTool;

impl CreateBranchTool {
    pub const NAME: &'static str = "create_branch";
    pub const DESCRIPTION: &'static str =
        "Create a new branch in a GitHub repository from an existing branch.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "branch": {"type": "string", "description": "Name for the new branch"},
                    "from_branch": {"type": "string", "description": "Source branch (defaults to the repository's default branch)"}
                },
                "required": ["owner", "repo", "branch"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match CreateBranchParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        // Resolve the source branch, falling back to the default branch.
        let source = if params.from_branch.is_empty() {
            let path = format!("repos/{}/{}", params.owner, params.repo);
            let resp = client.get(&path, &[]).await.map_err(transport_error)?;
            if !resp.is_success() {
                return api_result(resp, "get repository");
            }
            let repo: Value = resp.json().map_err(transport_error)?;
            json_str(&repo, "/default_branch")?
        } else {
            params.from_branch.clone()
        };

        info!(
            "Creating branch {} from {} in {}/{}",
            params.branch, source, params.owner, params.repo
        );

        let path = format!(
            "repos/{}/{}/git/ref/heads/{}",
            params.owner, params.repo, source
        );
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "get source branch reference");
        }
        let reference: Value = resp.json().map_err(transport_error)?;
        let sha = json_str(&reference, "/object/sha")?;

        let path = format!("repos/{}/{}/git/refs", params.owner, params.repo);
        let body = json!({
            "ref": format!("refs/heads/{}", params.branch),
            "sha": sha,
        });
        let resp = client.post(&path, &body).await.map_err(transport_error)?;
        api_result(resp, "create branch")
    }
}

#[derive(Debug)]
struct CreateBranchParams {
    owner: String,
    repo: String,
    branch: String,
    from_branch: String,
}

impl CreateBranchParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            branch: required_string(args, "branch")?,
            from_branch: optional_string(args, "from_branch")?,
        })
    }
}

// ============================================================================
// push_files
// ============================================================================

/// Push several files in a single commit via the git data API.
pub struct PushFilesTool;

impl PushFilesTool {
    pub const NAME: &'static str = "push_files";
    pub const DESCRIPTION: &'static str =
        "Push multiple files to a GitHub repository in a single commit.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "branch": {"type": "string", "description": "Branch to push to"},
                    "message": {"type": "string", "description": "Commit message"},
                    "files": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "path": {"type": "string", "description": "Path of the file"},
                                "content": {"type": "string", "description": "Content of the file"}
                            },
                            "required": ["path", "content"]
                        },
                        "description": "Files to push, each with a path and plain-text content"
                    }
                },
                "required": ["owner", "repo", "branch", "message", "files"]
            }),
        )
    }

    pub fn create_route<S>(client: Arc<GithubClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route_for(Self::to_tool(), client, |client, args| async move {
            Self::execute(&client, &args).await
        })
    }

    async fn execute(
        client: &GithubClient,
        args: &ArgumentBag,
    ) -> Result<CallToolResult, McpError> {
        let params = match PushFilesParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Pushing {} file(s) to {}/{} on {}",
            params.files.len(),
            params.owner,
            params.repo,
            params.branch
        );

        let repo_path = format!("repos/{}/{}", params.owner, params.repo);

        // Current head of the target branch.
        let path = format!("{}/git/ref/heads/{}", repo_path, params.branch);
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "get branch reference");
        }
        let reference: Value = resp.json().map_err(transport_error)?;
        let head_sha = json_str(&reference, "/object/sha")?;

        // Tree the head commit points at.
        let path = format!("{}/git/commits/{}", repo_path, head_sha);
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "get base commit");
        }
        let commit: Value = resp.json().map_err(transport_error)?;
        let base_tree = json_str(&commit, "/tree/sha")?;

        // New tree on top of it, with the file contents inlined.
        let entries: Vec<Value> = params
            .files
            .iter()
            .map(|f| {
                json!({
                    "path": f.path,
                    "mode": "100644",
                    "type": "blob",
                    "content": f.content,
                })
            })
            .collect();
        let path = format!("{repo_path}/git/trees");
        let body = json!({"base_tree": base_tree, "tree": entries});
        let resp = client.post(&path, &body).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "create tree");
        }
        let tree: Value = resp.json().map_err(transport_error)?;
        let tree_sha = json_str(&tree, "/sha")?;

        // Commit pointing at the new tree.
        let path = format!("{repo_path}/git/commits");
        let body = json!({
            "message": params.message,
            "tree": tree_sha,
            "parents": [head_sha],
        });
        let resp = client.post(&path, &body).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "create commit");
        }
        let commit: Value = resp.json().map_err(transport_error)?;
        let commit_sha = json_str(&commit, "/sha")?;

        // Move the branch reference.
        let path = format!("{}/git/refs/heads/{}", repo_path, params.branch);
        let body = json!({"sha": commit_sha});
        let resp = client.patch(&path, &body).await.map_err(transport_error)?;
        api_result(resp, "update branch reference")
    }
}

#[derive(Debug)]
struct FileEntry {
    path: String,
    content: String,
}

#[derive(Debug)]
struct PushFilesParams {
    owner: String,
    repo: String,
    branch: String,
    message: String,
    files: Vec<FileEntry>,
}

impl PushFilesParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            branch: required_string(args, "branch")?,
            message: required_string(args, "message")?,
            files: parse_files(args)?,
        })
    }
}

/// Parse the `files` parameter: a non-empty array of `{path, content}`
/// objects. A single malformed entry fails the whole call.
fn parse_files(args: &ArgumentBag) -> Result<Vec<FileEntry>, ToolError> {
    let items = match args.get("files") {
        None | Some(Value::Null) => return Err(ToolError::missing("files")),
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(ToolError::missing("files"));
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ToolError::mismatch("files", "array of objects", "other")),
    };

    let mut files = Vec::with_capacity(items.len());
    for item in items {
        let Some(entry) = item.as_object() else {
            return Err(ToolError::mismatch("files", "array of objects", "other"));
        };
        files.push(FileEntry {
            path: required_string(entry, "path")?,
            content: required_string(entry, "content")?,
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: serde_json::Value) -> ArgumentBag {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_file_contents_params_optional_branch() {
        let args = bag(json!({"owner": "o", "repo": "r", "path": "README.md"}));
        let params = GetFileContentsParams::from_args(&args).unwrap();
        assert_eq!(params.branch, "");
    }

    #[test]
    fn test_create_repository_params() {
        let args = bag(json!({"name": "demo", "private": true}));
        let params = CreateRepositoryParams::from_args(&args).unwrap();
        assert!(params.private);
        assert!(!params.auto_init);
        assert_eq!(params.description, "");
    }

    #[test]
    fn test_create_branch_params_default_source() {
        let args = bag(json!({"owner": "o", "repo": "r", "branch": "feature"}));
        let params = CreateBranchParams::from_args(&args).unwrap();
        assert!(params.from_branch.is_empty());
    }

    #[test]
    fn test_parse_files() {
        let args = bag(json!({
            "files": [
                {"path": "a.txt", "content": "hello"},
                {"path": "b.txt", "content": "world"}
            ]
        }));
        let files = parse_files(&args).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "a.txt");
        assert_eq!(files[1].content, "world");
    }

    #[test]
    fn test_parse_files_absent_or_empty() {
        assert!(matches!(
            parse_files(&bag(json!({}))),
            Err(ToolError::MissingParameter(_))
        ));
        assert!(matches!(
            parse_files(&bag(json!({"files": []}))),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_parse_files_rejects_malformed_entry() {
        let args = bag(json!({"files": [{"path": "a.txt"}]}));
        assert!(matches!(
            parse_files(&args),
            Err(ToolError::MissingParameter(name)) if name == "content"
        ));

        let args = bag(json!({"files": ["a.txt"]}));
        assert!(parse_files(&args).is_err());
    }

    #[test]
    fn test_json_str_pointer() {
        let value = json!({"object": {"sha": "abc123"}});
        assert_eq!(json_str(&value, "/object/sha").unwrap(), "abc123");
        assert!(json_str(&value, "/missing").is_err());
    }
}
