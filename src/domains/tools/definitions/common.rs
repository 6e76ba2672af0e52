//! Common utilities shared across GitHub tool definitions.
//!
//! This module provides schema construction, result shaping and route
//! plumbing helpers so that individual tool files stay focused on their
//! parameters and API calls.
//!
//! Result shaping preserves the two failure channels callers depend on:
//! a completed GitHub request with a non-success status becomes a *tool
//! error result* (the external service told us no), while a request that
//! could not be completed at all becomes a protocol-level error (the
//! system, not the request, is at fault).

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domains::tools::arguments::{ArgumentBag, optional_int_or};
use crate::domains::tools::error::ToolError;
use crate::github::{ApiResponse, GithubClient, GithubError};

/// Default page number for list endpoints.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 30;

/// Wrap a `json!` object literal into the schema representation rmcp wants.
pub fn object_schema(schema: Value) -> Arc<JsonObject> {
    match schema {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Build a `Tool` descriptor from its name, description and input schema.
pub fn tool(name: &'static str, description: &'static str, schema: Value) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: object_schema(schema),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Surface an argument validation failure as a tool error result.
///
/// Validation happens before any GitHub request is issued, so a rejected
/// call never reaches the network.
pub fn reject(err: ToolError) -> Result<CallToolResult, McpError> {
    Ok(error_result(&err.to_string()))
}

/// Convert a client failure into a protocol-level error.
pub fn transport_error(err: GithubError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

/// Shape a completed API exchange into a tool result.
///
/// A 2xx response passes the body through as the success payload; anything
/// else becomes a tool error naming the attempted action and the status.
pub fn api_result(resp: ApiResponse, action: &str) -> Result<CallToolResult, McpError> {
    if resp.is_success() {
        Ok(success_result(resp.body))
    } else {
        Ok(error_result(&format!(
            "failed to {}: {} {}",
            action, resp.status, resp.body
        )))
    }
}

/// Build a `ToolRoute` that hands the tool's argument bag and the shared
/// GitHub client to `call`.
pub fn route_for<S, F, Fut>(tool: Tool, client: Arc<GithubClient>, call: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<GithubClient>, ArgumentBag) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<CallToolResult, McpError>> + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let client = client.clone();
        let call = call.clone();
        async move { call(client, args).await }.boxed()
    })
}

/// Extract pagination parameters with their GitHub defaults.
pub fn pagination(args: &ArgumentBag) -> Result<(i64, i64), ToolError> {
    let page = optional_int_or(args, "page", DEFAULT_PAGE)?;
    let per_page = optional_int_or(args, "perPage", DEFAULT_PER_PAGE)?;
    Ok((page, per_page))
}

/// Schema fragment for the pagination parameters shared by list endpoints.
pub fn pagination_properties() -> Value {
    serde_json::json!({
        "page": {
            "type": "number",
            "description": "Page number (default: 1)"
        },
        "perPage": {
            "type": "number",
            "description": "Results per page (default: 30, max: 100)"
        }
    })
}

/// Add the shared pagination properties to a tool schema.
pub fn with_pagination(mut schema: Value) -> Value {
    if let Some(props) = schema.get_mut("properties").and_then(Value::as_object_mut) {
        if let Value::Object(extra) = pagination_properties() {
            for (key, value) in extra {
                props.insert(key, value);
            }
        }
    }
    schema
}

/// Insert a string field into a request body unless it is empty.
pub fn set_string(body: &mut Map<String, Value>, key: &str, value: String) {
    if !value.is_empty() {
        body.insert(key.to_string(), Value::String(value));
    }
}

/// Insert a string-array field into a request body unless it is empty.
pub fn set_string_array(body: &mut Map<String, Value>, key: &str, values: Vec<String>) {
    if !values.is_empty() {
        body.insert(
            key.to_string(),
            Value::Array(values.into_iter().map(Value::String).collect()),
        );
    }
}

/// Insert an integer field into a request body unless it is zero.
pub fn set_int(body: &mut Map<String, Value>, key: &str, value: i64) {
    if value != 0 {
        body.insert(key.to_string(), Value::Number(value.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_schema_preserves_properties() {
        let schema = object_schema(json!({
            "type": "object",
            "properties": {"owner": {"type": "string"}},
            "required": ["owner"]
        }));
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["owner"].is_object());
    }

    #[test]
    fn test_api_result_success_passes_body_through() {
        let resp = ApiResponse {
            status: 200,
            body: "{\"id\":1}".to_string(),
        };
        let result = api_result(resp, "get issue").unwrap();
        assert!(!result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_api_result_non_success_is_soft_error() {
        let resp = ApiResponse {
            status: 404,
            body: "{\"message\":\"Not Found\"}".to_string(),
        };
        let result = api_result(resp, "get issue").unwrap();
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_reject_is_soft_error() {
        let result = reject(ToolError::missing("owner")).unwrap();
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_pagination_defaults() {
        let args = json!({}).as_object().unwrap().clone();
        assert_eq!(pagination(&args).unwrap(), (1, 30));
        let args = json!({"page": 3, "perPage": 50}).as_object().unwrap().clone();
        assert_eq!(pagination(&args).unwrap(), (3, 50));
    }

    #[test]
    fn test_with_pagination_adds_shared_properties() {
        let schema = with_pagination(json!({
            "type": "object",
            "properties": {"owner": {"type": "string"}},
            "required": ["owner"]
        }));
        assert!(schema["properties"]["page"].is_object());
        assert!(schema["properties"]["perPage"].is_object());
        assert!(schema["properties"]["owner"].is_object());
    }

    #[test]
    fn test_set_helpers_skip_empty_values() {
        let mut body = Map::new();
        set_string(&mut body, "title", String::new());
        set_string_array(&mut body, "labels", Vec::new());
        set_int(&mut body, "milestone", 0);
        assert!(body.is_empty());

        set_string(&mut body, "title", "hello".to_string());
        set_string_array(&mut body, "labels", vec!["bug".to_string()]);
        set_int(&mut body, "milestone", 2);
        assert_eq!(body.len(), 3);
    }
}
