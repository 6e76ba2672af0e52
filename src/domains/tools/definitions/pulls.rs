//! Pull request tools.
//!
//! Read tools: `get_pull_request`, `list_pull_requests`,
//! `get_pull_request_files`, `get_pull_request_status`,
//! `get_pull_request_comments`, `get_pull_request_reviews`.
//! Mutating tools: `merge_pull_request`, `update_pull_request_branch`,
//! `create_pull_request_review`, `create_pull_request`.

use std::sync::Arc;

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
    ArgumentBag, optional_bool, optional_string, required_int, required_string,
};
use crate::domains::tools::error::ToolError;
use crate::github::GithubClient;

/// The (owner, repo, pull_number) triple shared by most pull request tools.
#[derive(Debug)]
struct PullRef {
    owner: String,
    repo: String,
    pull_number: i64,
}

impl PullRef {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            pull_number: required_int(args, "pull_number")?,
        })
    }

    fn path(&self, suffix: &str) -> String {
        format!(
            "repos/{}/{}/pulls/{}{}",
            self.owner, self.repo, self.pull_number, suffix
        )
    }
}

/// Schema shared by tools that take only a pull request reference.
fn pull_ref_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "owner": {"type": "string", "description": "Repository owner"},
            "repo": {"type": "string", "description": "Repository name"},
            "pull_number": {"type": "number", "description": "Pull request number"}
        },
        "required": ["owner", "repo", "pull_number"]
    })
}

// ============================================================================
// get_pull_request
// ============================================================================

/// Fetch a single pull request by number.
pub struct GetPullRequestTool;

impl GetPullRequestTool {
    pub const NAME: &'static str = "get_pull_request";
    pub const DESCRIPTION: &'static str =
        "Get details of a specific pull request in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(Self::NAME, Self::DESCRIPTION, pull_ref_schema())
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Fetching pull request {}/{}#{}", pr.owner, pr.repo, pr.pull_number);

        let resp = client.get(&pr.path(""), &[]).await.map_err(transport_error)?;
        api_result(resp, "get pull request")
    }
}

// ============================================================================
// list_pull_requests
// ============================================================================

/// List pull requests in a repository with filtering.
pub struct ListPullRequestsTool;

impl ListPullRequestsTool {
    pub const NAME: &'static str = "list_pull_requests";
    pub const DESCRIPTION: &'static str =
        "List and filter pull requests in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            with_pagination(json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "state": {"type": "string", "description": "Filter by state ('open', 'closed', 'all')"},
                    "sort": {"type": "string", "description": "Sort by ('created', 'updated', 'popularity', 'long-running')"},
                    "direction": {"type": "string", "description": "Sort direction ('asc', 'desc')"},
                    "head": {"type": "string", "description": "Filter by head user/org and branch name"},
                    "base": {"type": "string", "description": "Filter by base branch"}
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
        let params = match ListPullRequestsParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Listing pull requests for {}/{}", params.owner, params.repo);

        let path = format!("repos/{}/{}/pulls", params.owner, params.repo);
        let query = [
            ("state", params.state),
            ("sort", params.sort),
            ("direction", params.direction),
            ("head", params.head),
            ("base", params.base),
            ("page", params.page.to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        let resp = client.get(&path, &query).await.map_err(transport_error)?;
        api_result(resp, "list pull requests")
    }
}

#[derive(Debug)]
struct ListPullRequestsParams {
    owner: String,
    repo: String,
    state: String,
    sort: String,
    direction: String,
    head: String,
    base: String,
    page: i64,
    per_page: i64,
}

impl ListPullRequestsParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        let (page, per_page) = pagination(args)?;
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            state: optional_string(args, "state")?,
            sort: optional_string(args, "sort")?,
            direction: optional_string(args, "direction")?,
            head: optional_string(args, "head")?,
            base: optional_string(args, "base")?,
            page,
            per_page,
        })
    }
}

// ============================================================================
// get_pull_request_files
// ============================================================================

/// List the files changed in a pull request.
pub struct GetPullRequestFilesTool;

impl GetPullRequestFilesTool {
    pub const NAME: &'static str = "get_pull_request_files";
    pub const DESCRIPTION: &'static str =
        "Get the list of files changed in a specific pull request.";

    pub fn to_tool() -> Tool {
        tool(Self::NAME, Self::DESCRIPTION, pull_ref_schema())
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        let resp = client
            .get(&pr.path("/files"), &[])
            .await
            .map_err(transport_error)?;
        api_result(resp, "get pull request files")
    }
}

// ============================================================================
// get_pull_request_status
// ============================================================================

/// Fetch the combined commit status of a pull request's head.
pub struct GetPullRequestStatusTool;

impl GetPullRequestStatusTool {
    pub const NAME: &'static str = "get_pull_request_status";
    pub const DESCRIPTION: &'static str =
        "Get the combined status of all status checks for the head commit of a pull request.";

    pub fn to_tool() -> Tool {
        tool(Self::NAME, Self::DESCRIPTION, pull_ref_schema())
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        // Resolve the head SHA first, then ask for its combined status.
        let resp = client.get(&pr.path(""), &[]).await.map_err(transport_error)?;
        if !resp.is_success() {
            return api_result(resp, "get pull request");
        }

        let pull: Value = resp.json().map_err(transport_error)?;
        let Some(sha) = pull["head"]["sha"].as_str() else {
            return Err(McpError::internal_error(
                "pull request response is missing head.sha".to_string(),
                None,
            ));
        };

        let path = format!("repos/{}/{}/commits/{}/status", pr.owner, pr.repo, sha);
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        api_result(resp, "get combined status")
    }
}

// ============================================================================
// get_pull_request_comments
// ============================================================================

/// List the review comments on a pull request.
pub struct GetPullRequestCommentsTool;

impl GetPullRequestCommentsTool {
    pub const NAME: &'static str = "get_pull_request_comments";
    pub const DESCRIPTION: &'static str =
        "Get the review comments on a specific pull request.";

    pub fn to_tool() -> Tool {
        tool(Self::NAME, Self::DESCRIPTION, pull_ref_schema())
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        let resp = client
            .get(&pr.path("/comments"), &[])
            .await
            .map_err(transport_error)?;
        api_result(resp, "get pull request comments")
    }
}

// ============================================================================
// get_pull_request_reviews
// ============================================================================

/// List the reviews on a pull request.
pub struct GetPullRequestReviewsTool;

impl GetPullRequestReviewsTool {
    pub const NAME: &'static str = "get_pull_request_reviews";
    pub const DESCRIPTION: &'static str =
        "Get the reviews on a specific pull request.";

    pub fn to_tool() -> Tool {
        tool(Self::NAME, Self::DESCRIPTION, pull_ref_schema())
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        let resp = client
            .get(&pr.path("/reviews"), &[])
            .await
            .map_err(transport_error)?;
        api_result(resp, "get pull request reviews")
    }
}

// ============================================================================
// merge_pull_request
// ============================================================================

/// Merge a pull request.
pub struct MergePullRequestTool;

impl MergePullRequestTool {
    pub const NAME: &'static str = "merge_pull_request";
    pub const DESCRIPTION: &'static str =
        "Merge a pull request in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "pull_number": {"type": "number", "description": "Pull request number"},
                    "commit_title": {"type": "string", "description": "Title for the merge commit"},
                    "commit_message": {"type": "string", "description": "Extra detail for the merge commit"},
                    "merge_method": {"type": "string", "description": "Merge method ('merge', 'squash', 'rebase')"}
                },
                "required": ["owner", "repo", "pull_number"]
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };
        let (commit_title, commit_message, merge_method) = match (
            optional_string(args, "commit_title"),
            optional_string(args, "commit_message"),
            optional_string(args, "merge_method"),
        ) {
            (Ok(t), Ok(m), Ok(method)) => (t, m, method),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return reject(e),
        };

        info!("Merging pull request {}/{}#{}", pr.owner, pr.repo, pr.pull_number);

        let mut body = Map::new();
        set_string(&mut body, "commit_title", commit_title);
        set_string(&mut body, "commit_message", commit_message);
        set_string(&mut body, "merge_method", merge_method);

        let resp = client
            .put(&pr.path("/merge"), &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "merge pull request")
    }
}

// ============================================================================
// update_pull_request_branch
// ============================================================================

/// Update a pull request branch with changes from its base.
pub struct UpdatePullRequestBranchTool;

impl UpdatePullRequestBranchTool {
    pub const NAME: &'static str = "update_pull_request_branch";
    pub const DESCRIPTION: &'static str =
        "Update a pull request branch with the latest changes from the base branch.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "pull_number": {"type": "number", "description": "Pull request number"},
                    "expected_head_sha": {"type": "string", "description": "The expected SHA of the pull request's head ref"}
                },
                "required": ["owner", "repo", "pull_number"]
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
        let pr = match PullRef::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };
        let expected_head_sha = match optional_string(args, "expected_head_sha") {
            Ok(v) => v,
            Err(e) => return reject(e),
        };

        let mut body = Map::new();
        set_string(&mut body, "expected_head_sha", expected_head_sha);

        let resp = client
            .put(&pr.path("/update-branch"), &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "update pull request branch")
    }
}

// ============================================================================
// create_pull_request_review
// ============================================================================

/// Submit a review on a pull request.
pub struct CreatePullRequestReviewTool;

impl CreatePullRequestReviewTool {
    pub const NAME: &'static str = "create_pull_request_review";
    pub const DESCRIPTION: &'static str =
        "Create a review on a pull request (approve, request changes or comment).";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "pull_number": {"type": "number", "description": "Pull request number"},
                    "event": {"type": "string", "description": "Review action ('APPROVE', 'REQUEST_CHANGES', 'COMMENT')"},
                    "body": {"type": "string", "description": "Review comment text"},
                    "commit_id": {"type": "string", "description": "SHA of the commit to review"}
                },
                "required": ["owner", "repo", "pull_number", "event"]
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
        let params = match CreateReviewParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Creating review on {}/{}#{}",
            params.pr.owner, params.pr.repo, params.pr.pull_number
        );

        let mut body = Map::new();
        body.insert("event".to_string(), Value::String(params.event));
        set_string(&mut body, "body", params.body);
        set_string(&mut body, "commit_id", params.commit_id);

        let resp = client
            .post(&params.pr.path("/reviews"), &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "create pull request review")
    }
}

#[derive(Debug)]
struct CreateReviewParams {
    pr: PullRef,
    event: String,
    body: String,
    commit_id: String,
}

impl CreateReviewParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            pr: PullRef::from_args(args)?,
            event: required_string(args, "event")?,
            body: optional_string(args, "body")?,
            commit_id: optional_string(args, "commit_id")?,
        })
    }
}

// ============================================================================
// create_pull_request
// ============================================================================

/// Open a new pull request.
pub struct CreatePullRequestTool;

impl CreatePullRequestTool {
    pub const NAME: &'static str = "create_pull_request";
    pub const DESCRIPTION: &'static str =
        "Create a new pull request in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "title": {"type": "string", "description": "Pull request title"},
                    "head": {"type": "string", "description": "Branch containing the changes"},
                    "base": {"type": "string", "description": "Branch to merge into"},
                    "body": {"type": "string", "description": "Pull request description"},
                    "draft": {"type": "boolean", "description": "Create as a draft pull request"},
                    "maintainer_can_modify": {"type": "boolean", "description": "Allow maintainer edits"}
                },
                "required": ["owner", "repo", "title", "head", "base"]
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
        let params = match CreatePullRequestParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Creating pull request {} -> {} in {}/{}",
            params.head, params.base, params.owner, params.repo
        );

        let mut body = Map::new();
        body.insert("title".to_string(), Value::String(params.title));
        body.insert("head".to_string(), Value::String(params.head));
        body.insert("base".to_string(), Value::String(params.base));
        set_string(&mut body, "body", params.body);
        body.insert("draft".to_string(), Value::Bool(params.draft));
        body.insert(
            "maintainer_can_modify".to_string(),
            Value::Bool(params.maintainer_can_modify),
        );

        let path = format!("repos/{}/{}/pulls", params.owner, params.repo);
        let resp = client
            .post(&path, &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "create pull request")
    }
}

#[derive(Debug)]
struct CreatePullRequestParams {
    owner: String,
    repo: String,
    title: String,
    head: String,
    base: String,
    body: String,
    draft: bool,
    maintainer_can_modify: bool,
}

impl CreatePullRequestParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            title: required_string(args, "title")?,
            head: required_string(args, "head")?,
            base: required_string(args, "base")?,
            body: optional_string(args, "body")?,
            draft: optional_bool(args, "draft")?,
            maintainer_can_modify: optional_bool(args, "maintainer_can_modify")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: serde_json::Value) -> ArgumentBag {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_pull_ref_from_args() {
        let args = bag(json!({"owner": "o", "repo": "r", "pull_number": 42}));
        let pr = PullRef::from_args(&args).unwrap();
        assert_eq!(pr.path(""), "repos/o/r/pulls/42");
        assert_eq!(pr.path("/files"), "repos/o/r/pulls/42/files");
    }

    #[test]
    fn test_pull_ref_truncates_number() {
        let args = bag(json!({"owner": "o", "repo": "r", "pull_number": 42.9}));
        let pr = PullRef::from_args(&args).unwrap();
        assert_eq!(pr.pull_number, 42);
    }

    #[test]
    fn test_pull_ref_missing_number() {
        let args = bag(json!({"owner": "o", "repo": "r"}));
        assert!(matches!(
            PullRef::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "pull_number"
        ));
    }

    #[test]
    fn test_create_pull_request_requires_branches() {
        let args = bag(json!({"owner": "o", "repo": "r", "title": "t", "head": "f"}));
        assert!(matches!(
            CreatePullRequestParams::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "base"
        ));
    }

    #[test]
    fn test_create_pull_request_draft_defaults_false() {
        let args = bag(json!({
            "owner": "o", "repo": "r", "title": "t", "head": "f", "base": "main"
        }));
        let params = CreatePullRequestParams::from_args(&args).unwrap();
        assert!(!params.draft);
        assert!(!params.maintainer_can_modify);
    }

    #[test]
    fn test_create_review_requires_event() {
        let args = bag(json!({"owner": "o", "repo": "r", "pull_number": 1}));
        assert!(matches!(
            CreateReviewParams::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "event"
        ));
    }
}
