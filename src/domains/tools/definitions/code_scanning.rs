//! Code scanning alert tools.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::ToolRoute,
    model::{CallToolResult, Tool},
};
use serde_json::json;
use tracing::info;

use super::common::{api_result, reject, route_for, tool, transport_error};
use crate::domains::tools::arguments::{
    ArgumentBag, optional_string, required_int, required_string,
};
use crate::domains::tools::error::ToolError;
use crate::github::GithubClient;

/// Fetch a single code scanning alert.
pub struct GetCodeScanningAlertTool;

impl GetCodeScanningAlertTool {
    pub const NAME: &'static str = "get_code_scanning_alert";
    pub const DESCRIPTION: &'static str =
        "Get details of a specific code scanning alert in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "alert_number": {"type": "number", "description": "Number of the alert"}
                },
                "required": ["owner", "repo", "alert_number"]
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
        let params = match GetAlertParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Fetching code scanning alert {} in {}/{}",
            params.alert_number, params.owner, params.repo
        );

        let path = format!(
            "repos/{}/{}/code-scanning/alerts/{}",
            params.owner, params.repo, params.alert_number
        );
        let resp = client.get(&path, &[]).await.map_err(transport_error)?;
        api_result(resp, "get code scanning alert")
    }
}

#[derive(Debug)]
struct GetAlertParams {
    owner: String,
    repo: String,
    alert_number: i64,
}

impl GetAlertParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            alert_number: required_int(args, "alert_number")?,
        })
    }
}

/// List code scanning alerts for a repository.
pub struct ListCodeScanningAlertsTool;

impl ListCodeScanningAlertsTool {
    pub const NAME: &'static str = "list_code_scanning_alerts";
    pub const DESCRIPTION: &'static str =
        "List code scanning alerts in a GitHub repository.";

    pub fn to_tool() -> Tool {
        tool(
            Self::NAME,
            Self::DESCRIPTION,
            json!({
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "ref": {"type": "string", "description": "Git reference to list alerts for"},
                    "state": {"type": "string", "description": "Filter by state", "default": "open"},
                    "severity": {"type": "string", "description": "Filter by severity"}
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
        let params = match ListAlertsParams::from_args(args) {
            Ok(p) => p,
            Err(e) => return reject(e),
        };

        info!(
            "Listing code scanning alerts in {}/{}",
            params.owner, params.repo
        );

        let path = format!("repos/{}/{}/code-scanning/alerts", params.owner, params.repo);
        let query = [
            ("ref", params.reference),
            ("state", params.state),
            ("severity", params.severity),
        ];
        let resp = client.get(&path, &query).await.map_err(transport_error)?;
        api_result(resp, "list code scanning alerts")
    }
}

#[derive(Debug)]
struct ListAlertsParams {
    owner: String,
    repo: String,
    reference: String,
    state: String,
    severity: String,
}

impl ListAlertsParams {
    fn from_args(args: &ArgumentBag) -> Result<Self, ToolError> {
        Ok(Self {
            owner: required_string(args, "owner")?,
            repo: required_string(args, "repo")?,
            reference: optional_string(args, "ref")?,
            state: optional_string(args, "state")?,
            severity: optional_string(args, "severity")?,
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
    fn test_get_alert_params_truncates_number() {
        let args = bag(json!({"owner": "o", "repo": "r", "alert_number": 7.4}));
        let params = GetAlertParams::from_args(&args).unwrap();
        assert_eq!(params.alert_number, 7);
    }

    #[test]
    fn test_get_alert_params_rejects_zero_number() {
        let args = bag(json!({"owner": "o", "repo": "r", "alert_number": 0}));
        assert!(matches!(
            GetAlertParams::from_args(&args),
            Err(ToolError::MissingParameter(name)) if name == "alert_number"
        ));
    }

    #[test]
    fn test_list_alerts_params_filters_default_empty() {
        let args = bag(json!({"owner": "o", "repo": "r"}));
        let params = ListAlertsParams::from_args(&args).unwrap();
        assert!(params.state.is_empty());
        assert!(params.severity.is_empty());
    }
}
