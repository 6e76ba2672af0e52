//! Authenticated-user tools.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use serde_json::json;
use tracing::info;

use super::common::{api_result, reject, route_for, tool, transport_error};
use crate::domains::tools::arguments::{ArgumentBag, optional_string};
use crate::github::GithubClient;

/// Return details of the user the token belongs to.
pub struct GetMeTool;

impl GetMeTool {
    pub const NAME: &'static str = "get_me";
    pub const DESCRIPTION: &'static str = "Get details of the authenticated GitHub user. \
         Use this when a request refers to \"me\" or \"my\" account.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "reason": {
                        "type": "string",
                        "description": "Optional: the reason for requesting the user information"
                    }
                }
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
        let reason = match optional_string(args, "reason") {
            Ok(r) => r,
            Err(e) => return reject(e),
        };

        if reason.is_empty() {
            info!("Fetching authenticated user");
        } else {
            info!("Fetching authenticated user: {}", reason);
        }

        let resp = client.get("user", &[]).await.map_err(transport_error)?;
        api_result(resp, "get user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_me_tool_has_no_required_parameters() {
        let tool = GetMeTool::to_tool();
        assert_eq!(tool.name, "get_me");
        assert!(tool.input_schema.get("required").is_none());
        assert!(tool.input_schema["properties"]["reason"].is_object());
    }
}
