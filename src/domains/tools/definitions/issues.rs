//! Issue tools.
//!
//! Read tools: `get_issue`, `search_issues`, `list_issues`.
//! Mutating tools: `create_issue`, `add_issue_comment`, `update_issue`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{
    api_result, pagination, reject, route_for, set_int, set_string, set_string_array, tool,
    transport_error, with_pagination,
};
use crate::domains::tools::arguments::{
    ArgumentBag, optional_int, optional_string, optional_string_array, required_int,
    required_string,
};
use crate::domains::tools::error::ToolError;
use crate::github::GithubClient;

// ============================================================================
// get_issue
// ============================================================================

/// Fetch a single issue by number.
pub struct GetIssueTool;

impl GetIssueTool {
    pub const NAME: &'static str = "get_issue";
    pub const DESCRIPTION: &'static str =
        "Get details of a specific issue in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "issue_number": {"type": "number", "description": "Issue number"}
                },
                "required": ["owner", "repo", "issue_number"]
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
        let params = match GetIssueParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Fetching issue {}/{}#{}",
            params.owner, params.repo, params.issue_number
        );

        let path = format!(
            "repos/{}/{}/issues/{}",
            params.owner, params.repo, params.issue_number
        );
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        api_result(resp, "get issue")
    }
}

#[derive(Debug)]
struct GetIssueParams {
    owner: String,
    repo: String,
    issue_number: i64,
}

impl GetIssueParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            issue_number: required_int(args, "issue_number")?,
        })
    }
}

// ============================================================================
// search_issues
// ============================================================================

/// Search issues and pull requests across repositories.
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    pub const NAME: &'static str = "search_issues";
    pub const DESCRIPTION: &'static str =
        "Search for issues and pull requests across GitHub repositories using the issue search syntax.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            with_pagination(json!({
                "type": "object",
                "properties": {
                    "q": {"type": "string", "description": "Search query using GitHub issues search syntax"},
                    "sort": {"type": "string", "description": "Sort field (comments, reactions, created, updated...)"},
                    "order": {"type": "string", "description": "Sort order ('asc' or 'desc')"}
                },
                "required": ["q"]
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
        let params = match SearchIssuesParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Searching issues: {}", params.q);

        let query = [
            ("q", params.q),
            ("sort", params.sort),
            ("order", params.order),
            ("page", params.page.to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        let resp = client
            .get("search/issues", &query)
            .await
            .map_err(transport_error)?;
        api_result(resp, "search issues")
    }
}

#[derive(Debug)]
struct SearchIssuesParams {
    q: String,
    sort: String,
    order: String,
    page: i64,
    per_page: i64,
}

impl SearchIssuesParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        let (page, per_page) = pagination(args)?;
        Ok(Self {
            q: required_string(args, "q")?,
            sort: optional_string(args, "sort")?,
            order: optional_string(args, "order")?,
            page,
            per_page,
        })
    }
}

// ============================================================================
// list_issues
// ============================================================================

/// List issues in a repository with filtering.
pub struct ListIssuesTool;

impl ListIssuesTool {
    pub const NAME: &'static str = "list_issues";
    pub const DESCRIPTION: &'static str =
        "List issues in a GitHub repository with optional filtering by state, labels and recency.";

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
                    "labels": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Filter by labels"
                    },
                    "sort": {"type": "string", "description": "Sort by ('created', 'updated', 'comments')"},
                    "direction": {"type": "string", "description": "Sort direction ('asc', 'desc')"},
                    "since": {"type": "string", "description": "Filter by date (ISO 8601 timestamp)"}
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
        let params = match ListIssuesParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Listing issues for {}/{}", params.owner, params.repo);

        let path = format!("repos/{}/{}/issues", params.owner, params.repo);
        let query = [
            ("state", params.state),
            ("labels", params.labels.join(",")),
            ("sort", params.sort),
            ("direction", params.direction),
            ("since", params.since),
            ("page", params.page.to_string()),
            ("per_page", params.per_page.to_string()),
        ];
        let resp = client.get(&path, &query).await.map_err(transport_error)?;
        api_result(resp, "list issues")
    }
}

#[derive(Debug)]
struct ListIssuesParams {
    owner: String,
    repo: String,
    state: String,
    labels: Vec<String>,
    sort: String,
    direction: String,
    since: String,
    page: i64,
    per_page: i64,
}

impl ListIssuesParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        let (page, per_page) = pagination(args)?;
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            state: optional_string(args, "state")?,
            labels: optional_string_array(args, "labels")?,
            sort: optional_string(args, "sort")?,
            direction: optional_string(args, "direction")?,
            since: optional_string(args, "since")?,
            page,
            per_page,
        })
    }
}

// ============================================================================
// create_issue
// ============================================================================

/// Open a new issue.
pub struct CreateIssueTool;

impl CreateIssueTool {
    pub const NAME: &'static str = "create_issue";
    pub const DESCRIPTION: &'static str =
        "Create a new issue in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "title": {"type": "string", "description": "Issue title"},
                    "body": {"type": "string", "description": "Issue body content"},
                    "assignees": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Usernames to assign to this issue"
                    },
                    "labels": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Labels to apply to this issue"
                    }
                },
                "required": ["owner", "repo", "title"]
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
        let params = match CreateIssueParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Creating issue in {}/{}", params.owner, params.repo);

        let mut body = Map::new();
        body.insert("title".to_string(), Value::String(params.title));
        set_string(&mut body, "body", params.body);
        set_string_array(&mut body, "assignees", params.assignees);
        set_string_array(&mut body, "labels", params.labels);

        let path = format!("repos/{}/{}/issues", params.owner, params.repo);
        let resp = client
            .post(&path, &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "create issue")
    }
}

#[derive(Debug)]
struct CreateIssueParams {
    owner: String,
    repo: String,
    title: String,
    body: String,
    assignees: Vec<String>,
    labels: Vec<String>,
}

impl CreateIssueParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            title: required_string(args, "title")?,
            body: optional_string(args, "body")?,
            assignees: optional_string_array(args, "assignees")?,
            labels: optional_string_array(args, "labels")?,
        })
    }
}

// ============================================================================
// add_issue_comment
// ============================================================================

/// Comment on an existing issue.
pub struct AddIssueCommentTool;

impl AddIssueCommentTool {
    pub const NAME: &'static str = "add_issue_comment";
    pub const DESCRIPTION: &'static str =
        "Add a comment to an existing issue in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "issue_number": {"type": "number", "description": "Issue number to comment on"},
                    "body": {"type": "string", "description": "Comment text"}
                },
                "required": ["owner", "repo", "issue_number", "body"]
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
        let params = match AddIssueCommentParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Commenting on {}/{}#{}",
            params.owner, params.repo, params.issue_number
        );

        let path = format!(
            "repos/{}/{}/issues/{}/comments",
            params.owner, params.repo, params.issue_number
        );
        let body = json!({"body": params.body});
        let resp = client.post(&path, &body).await.map_err(transport_error)?;
        api_result(resp, "add issue comment")
    }
}

#[derive(Debug)]
struct AddIssueCommentParams {
    owner: String,
    repo: String,
    issue_number: i64,
    body: String,
}

impl AddIssueCommentParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            issue_number: required_int(args, "issue_number")?,
            body: required_string(args, "body")?,
        })
    }
}

// ============================================================================
// update_issue
// ============================================================================

/// Update fields of an existing issue.
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    pub const NAME: &'static str = "update_issue";
    pub const DESCRIPTION: &'static str =
        "Update an existing issue in a GitHub repository (title, body, state, labels, assignees, milestone).";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "issue_number": {"type": "number", "description": "Issue number to update"},
                    "title": {"type": "string", "description": "New title"},
                    "body": {"type": "string", "description": "New body content"},
                    "state": {"type": "string", "description": "New state ('open' or 'closed')"},
                    "labels": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "New labels"
                    },
                    "assignees": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "New assignees"
                    },
                    "milestone": {"type": "number", "description": "New milestone number"}
                },
                "required": ["owner", "repo", "issue_number"]
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
        let params = match UpdateIssueParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Updating issue {}/{}#{}",
            params.owner, params.repo, params.issue_number
        );

        let mut body = Map::new();
        set_string(&mut body, "title", params.title);
        set_string(&mut body, "body", params.body);
        set_string(&mut body, "state", params.state);
        set_string_array(&mut body, "labels", params.labels);
        set_string_array(&mut body, "assignees", params.assignees);
        set_int(&mut body, "milestone", params.milestone);

        let path = format!(
            "repos/{}/{}/issues/{}",
            params.owner, params.repo, params.issue_number
        );
        let resp = client
            .patch(&path, &Value::Object(body))
            .await
            .map_err(transport_error)?;
        api_result(resp, "update issue")
    }
}

#[derive(Debug)]
struct UpdateIssueParams {
    owner: String,
    repo: String,
    issue_number: i64,
    title: String,
    body: String,
    state: String,
    labels: Vec<String>,
    assignees: Vec<String>,
    milestone: i64,
}

impl UpdateIssueParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            issue_number: required_int(args, "issue_number")?,
            title: optional_string(args, "title")?,
            body: optional_string(args, "body")?,
            state: optional_string(args, "state")?,
            labels: optional_string_array(args, "labels")?,
            assignees: optional_string_array(args, "assignees")?,
            milestone: optional_int(args, "milestone")?,
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
    fn test_get_issue_params() {
        let args = bag(json!({"owner": "octocat", "repo": "hello", "issue_number": 7}));
        let params = GetIssueParams::from_args(&args).unwrap();
        assert_eq!(params.owner, "octocat");
        assert_eq!(params.issue_number, 7);
    }

    #[test]
    fn test_get_issue_params_rejects_zero_number() {
        let args = bag(json!({"owner": "octocat", "repo": "hello", "issue_number": 0}));
        assert!(matches!(
            GetIssueParams::from_args(&args),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_list_issues_params_defaults() {
        let args = bag(json!({"owner": "octocat", "repo": "hello"}));
        let params = ListIssuesParams::from_args(&args).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 30);
        assert!(params.labels.is_empty());
        assert_eq!(params.state, "");
    }

    #[test]
    fn test_list_issues_params_bad_labels() {
        let args = bag(json!({"owner": "o", "repo": "r", "labels": ["bug", 3]}));
        assert!(ListIssuesParams::from_args(&args).is_err());
    }

    #[test]
    fn test_create_issue_requires_title() {
        let args = bag(json!({"owner": "o", "repo": "r", "title": ""}));
        assert!(matches!(
            CreateIssueParams::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "title"
        ));
    }

    #[test]
    fn test_update_issue_optional_fields_default() {
        let args = bag(json!({"owner": "o", "repo": "r", "issue_number": 1}));
        let params = UpdateIssueParams::from_args(&args).unwrap();
        assert_eq!(params.title, "");
        assert_eq!(params.milestone, 0);
    }

    #[test]
    fn test_issue_tool_schemas_declare_required() {
        let tool = GetIssueTool::to_tool();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        let tool = AddIssueCommentTool::to_tool();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("body")));
    }
}
