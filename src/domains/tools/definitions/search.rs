//! Code and user search tools.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use serde_json::json;
use tracing::info;

use super::common::{
    api_result, pagination, reject, route_for, tool, transport_error, with_pagination,
};
use crate::domains::tools::arguments::{ArgumentBag, optional_string, required_string};
use crate::domains::tools::error::ToolError;
use crate::github::GithubClient;

#[derive(Debug)]
struct SearchParams {
    query: String,
    sort: String,
    order: String,
    page: i64,
    per_page: i64,
}

impl SearchParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        let (page, per_page) = pagination(args)?;
        Ok(Self {
            query: required_string(args, "q")?,
            sort: optional_string(args, "sort")?,
            order: optional_string(args, "order")?,
            page,
            per_page,
        })
    }

    fn query(&self) -> [(&'static str, String); 5] {
        [
            ("q", self.query.clone()),
            ("sort", self.sort.clone()),
            ("order", self.order.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

fn search_schema(query_description: &str, sort_description: &str) -> serde_json::Value {
    with_pagination(json!({
        "type": "object",
        "properties": {
            "q": {"type": "string", "description": query_description},
            "sort": {"type": "string", "description": sort_description},
            "order": {"type": "string", "enum": ["asc", "desc"], "description": "Sort order"}
        },
        "required": ["q"]
    }))
}

/// Search code across GitHub repositories.
pub struct SearchCodeTool;

impl SearchCodeTool {
    pub const NAME: &'static str = "search_code";
    pub const DESCRIPTION: &'static str =
        "Search for code across GitHub repositories using the code search syntax.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            search_schema(
                "Code search query (see GitHub code search syntax)",
                "Sort field (only 'indexed' is supported)",
            ),
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
        let params = match SearchParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Searching code: {}", params.query);

        let resp = client
            .get("search/code", &params.query())
            .await
            .map_err(transport_error)?;
        api_result(resp, "search code")
    }
}

/// Search GitHub users.
pub struct SearchUsersTool;

impl SearchUsersTool {
    pub const NAME: &'static str = "search_users";
    pub const DESCRIPTION: &'static str =
        "Search for GitHub users using the user search syntax.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            search_schema(
                "User search query (see GitHub user search syntax)",
                "Sort field ('followers', 'repositories' or 'joined')",
            ),
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
        let params = match SearchParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!("Searching users: {}", params.query);

        let resp = client
            .get("search/users", &params.query())
            .await
            .map_err(transport_error)?;
        api_result(resp, "search users")
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
    fn test_search_params_defaults() {
        let args = bag(json!({"q": "tokio language:rust"}));
        let params = SearchParams::from_args(&args).unwrap();
        assert_eq!(params.query, "tokio language:rust");
        assert_eq!(params.sort, "");
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 30);
    }

    #[test]
    fn test_search_params_requires_query() {
        let args = bag(json!({"sort": "indexed"}));
        assert!(matches!(
            SearchParams::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "q"
        ));
    }

    #[test]
    fn test_search_schema_lists_query_required() {
        let tool = SearchCodeTool::to_tool();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert_eq!(required, &[json!("q")]);
    }
}
