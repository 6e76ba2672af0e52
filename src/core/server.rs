//! MCP server handler.
//!
//! Wires the tool registry and the repository resource service into the MCP
//! protocol. The tool catalog is fixed at startup: the capability filter is
//! applied once, when the router is built, and `tools/list` reflects exactly
//! the routes that exist.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter,
    model::*, service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use crate::domains::resources::{RepoResourceService, ResourceError};
use crate::domains::tools::{ToolFilter, ToolRegistry};
use crate::github::GithubClient;

/// The main MCP server handler.
#[derive(Clone)]
pub struct GithubMcpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service resolving `repo://` resource URIs.
    resource_service: Arc<RepoResourceService>,

    /// Router holding one route per exposed tool.
    tool_router: ToolRouter<Self>,
}

impl GithubMcpServer {
    /// Create a new server from the given configuration.
    pub fn new(config: Config) -> crate::core::error::Result<Self> {
        let config = Arc::new(config);

        let client = Arc::new(GithubClient::new(&config.github)?);
        let filter = ToolFilter::from_config(&config.tools);
        if filter.read_only() {
            info!("Read-only mode: mutating tools are withheld");
        }
        let registry = ToolRegistry::new(filter, client.clone());

        Ok(Self {
            tool_router: registry.build_router::<Self>(),
            resource_service: Arc::new(RepoResourceService::new(client)),
            config,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }
}

#[tool_handler]
impl ServerHandler for GithubMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "GitHub MCP server. Provides tools for working with issues, pull requests, \
                 repository contents, search and code scanning alerts, plus repo:// resources \
                 for reading repository files."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        // Repository content is only addressable through templates; there
        // are no fixed resources to enumerate.
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resource_service.list_templates(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::InvalidUri(_) => McpError::invalid_params(e.to_string(), None),
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                other => {
                    warn!("Failed to read resource {}: {}", request.uri, other);
                    McpError::internal_error(other.to_string(), None)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ToolsConfig;

    fn config(tools: ToolsConfig) -> Config {
        Config {
            tools,
            ..Config::default()
        }
    }

    #[test]
    fn test_server_builds_full_router_by_default() {
        let server = GithubMcpServer::new(config(ToolsConfig::default())).unwrap();
        assert_eq!(server.tool_router.list_all().len(), 29);
    }

    #[test]
    fn test_read_only_server_has_no_mutating_routes() {
        let server = GithubMcpServer::new(config(ToolsConfig {
            read_only: true,
            ..ToolsConfig::default()
        }))
        .unwrap();
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names.len(), 17);
        assert!(!names.contains(&"merge_pull_request".to_string()));
    }

    #[test]
    fn test_get_info_advertises_tools_and_resources() {
        let server = GithubMcpServer::new(config(ToolsConfig::default())).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }
}
