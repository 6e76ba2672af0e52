//! Tool registry: the single catalog of every tool the server can expose,
//! with the capability filter applied both when listing tools and when
//! wiring their routes.
//!
//! The catalog order is stable: clients see the same tool list across runs
//! for a given configuration.

use std::sync::Arc;

use rmcp::handler::server::tool::{ToolRoute, ToolRouter};
use rmcp::model::Tool;
use tracing::{debug, info};

use super::definitions::*;
use super::filter::ToolFilter;
use crate::github::GithubClient;

/// An entry in the catalog: tool name, whether it mutates GitHub state, and
/// its definition factory.
type CatalogEntry = (&'static str, bool, fn() -> Tool);

/// Knows every tool, and which of them the current configuration exposes.
pub struct ToolRegistry {
    filter: ToolFilter,
    client: Arc<GithubClient>,
}

impl ToolRegistry {
    pub fn new(filter: ToolFilter, client: Arc<GithubClient>) -> Self {
        Self { filter, client }
    }

    /// The full catalog, in the order tools are listed to clients.
    /// The second tuple field marks mutating tools, which a read-only
    /// server withholds.
    pub fn full_catalog() -> Vec<CatalogEntry> {
        vec![
            // Issues
            (GetIssueTool::NAME, false, GetIssueTool::to_tool),
            (SearchIssuesTool::NAME, false, SearchIssuesTool::to_tool),
            (ListIssuesTool::NAME, false, ListIssuesTool::to_tool),
            (CreateIssueTool::NAME, true, CreateIssueTool::to_tool),
            (AddIssueCommentTool::NAME, true, AddIssueCommentTool::to_tool),
            (UpdateIssueTool::NAME, true, UpdateIssueTool::to_tool),
            // Pull requests
            (GetPullRequestTool::NAME, false, GetPullRequestTool::to_tool),
            (
                ListPullRequestsTool::NAME,
                false,
                ListPullRequestsTool::to_tool,
            ),
            (
                GetPullRequestFilesTool::NAME,
                false,
                GetPullRequestFilesTool::to_tool,
            ),
            (
                GetPullRequestStatusTool::NAME,
                false,
                GetPullRequestStatusTool::to_tool,
            ),
            (
                GetPullRequestCommentsTool::NAME,
                false,
                GetPullRequestCommentsTool::to_tool,
            ),
            (
                GetPullRequestReviewsTool::NAME,
                false,
                GetPullRequestReviewsTool::to_tool,
            ),
            (
                MergePullRequestTool::NAME,
                true,
                MergePullRequestTool::to_tool,
            ),
            (
                UpdatePullRequestBranchTool::NAME,
                true,
                UpdatePullRequestBranchTool::to_tool,
            ),
            (
                CreatePullRequestReviewTool::NAME,
                true,
                CreatePullRequestReviewTool::to_tool,
            ),
            (
                CreatePullRequestTool::NAME,
                true,
                CreatePullRequestTool::to_tool,
            ),
            // Repositories
            (
                SearchRepositoriesTool::NAME,
                false,
                SearchRepositoriesTool::to_tool,
            ),
            (
                GetFileContentsTool::NAME,
                false,
                GetFileContentsTool::to_tool,
            ),
            (ListCommitsTool::NAME, false, ListCommitsTool::to_tool),
            (
                CreateOrUpdateFileTool::NAME,
                true,
                CreateOrUpdateFileTool::to_tool,
            ),
            (
                CreateRepositoryTool::NAME,
                true,
                CreateRepositoryTool::to_tool,
            ),
            (ForkRepositoryTool::NAME, true, ForkRepositoryTool::to_tool),
            (CreateBranchTool::NAME, true, CreateBranchTool::to_tool),
            (PushFilesTool::NAME, true, PushFilesTool::to_tool),
            // Search
            (SearchCodeTool::NAME, false, SearchCodeTool::to_tool),
            (SearchUsersTool::NAME, false, SearchUsersTool::to_tool),
            // Users
            (GetMeTool::NAME, false, GetMeTool::to_tool),
            // Code scanning
            (
                GetCodeScanningAlertTool::NAME,
                false,
                GetCodeScanningAlertTool::to_tool,
            ),
            (
                ListCodeScanningAlertsTool::NAME,
                false,
                ListCodeScanningAlertsTool::to_tool,
            ),
        ]
    }

    /// Tool definitions surviving the capability filter, in catalog order.
    pub fn exposed_tools(&self) -> Vec<Tool> {
        Self::full_catalog()
            .into_iter()
            .filter(|(name, mutating, _)| self.filter.allows(name, *mutating))
            .map(|(_, _, factory)| factory())
            .collect()
    }

    /// Build the router with a route for every exposed tool. A tool the
    /// filter withholds gets no route: calling it fails the same way an
    /// unknown tool does.
    pub fn build_router<S>(&self) -> ToolRouter<S>
    where
        S: Send + Sync + 'static,
    {
        let mut router = ToolRouter::new();
        router = self.route_if(router, GetIssueTool::NAME, false, || {
            GetIssueTool::create_route(self.client.clone())
        });
        router = self.route_if(router, SearchIssuesTool::NAME, false, || {
            SearchIssuesTool::create_route(self.client.clone())
        });
        router = self.route_if(router, ListIssuesTool::NAME, false, || {
            ListIssuesTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreateIssueTool::NAME, true, || {
            CreateIssueTool::create_route(self.client.clone())
        });
        router = self.route_if(router, AddIssueCommentTool::NAME, true, || {
            AddIssueCommentTool::create_route(self.client.clone())
        });
        router = self.route_if(router, UpdateIssueTool::NAME, true, || {
            UpdateIssueTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetPullRequestTool::NAME, false, || {
            GetPullRequestTool::create_route(self.client.clone())
        });
        router = self.route_if(router, ListPullRequestsTool::NAME, false, || {
            ListPullRequestsTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetPullRequestFilesTool::NAME, false, || {
            GetPullRequestFilesTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetPullRequestStatusTool::NAME, false, || {
            GetPullRequestStatusTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetPullRequestCommentsTool::NAME, false, || {
            GetPullRequestCommentsTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetPullRequestReviewsTool::NAME, false, || {
            GetPullRequestReviewsTool::create_route(self.client.clone())
        });
        router = self.route_if(router, MergePullRequestTool::NAME, true, || {
            MergePullRequestTool::create_route(self.client.clone())
        });
        router = self.route_if(router, UpdatePullRequestBranchTool::NAME, true, || {
            UpdatePullRequestBranchTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreatePullRequestReviewTool::NAME, true, || {
            CreatePullRequestReviewTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreatePullRequestTool::NAME, true, || {
            CreatePullRequestTool::create_route(self.client.clone())
        });
        router = self.route_if(router, SearchRepositoriesTool::NAME, false, || {
            SearchRepositoriesTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetFileContentsTool::NAME, false, || {
            GetFileContentsTool::create_route(self.client.clone())
        });
        router = self.route_if(router, ListCommitsTool::NAME, false, || {
            ListCommitsTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreateOrUpdateFileTool::NAME, true, || {
            CreateOrUpdateFileTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreateRepositoryTool::NAME, true, || {
            CreateRepositoryTool::create_route(self.client.clone())
        });
        router = self.route_if(router, ForkRepositoryTool::NAME, true, || {
            ForkRepositoryTool::create_route(self.client.clone())
        });
        router = self.route_if(router, CreateBranchTool::NAME, true, || {
            CreateBranchTool::create_route(self.client.clone())
        });
        router = self.route_if(router, PushFilesTool::NAME, true, || {
            PushFilesTool::create_route(self.client.clone())
        });
        router = self.route_if(router, SearchCodeTool::NAME, false, || {
            SearchCodeTool::create_route(self.client.clone())
        });
        router = self.route_if(router, SearchUsersTool::NAME, false, || {
            SearchUsersTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetMeTool::NAME, false, || {
            GetMeTool::create_route(self.client.clone())
        });
        router = self.route_if(router, GetCodeScanningAlertTool::NAME, false, || {
            GetCodeScanningAlertTool::create_route(self.client.clone())
        });
        router = self.route_if(router, ListCodeScanningAlertsTool::NAME, false, || {
            ListCodeScanningAlertsTool::create_route(self.client.clone())
        });

        info!("Registered {} tool(s)", router.list_all().len());
        router
    }

    fn route_if<S>(
        &self,
        router: ToolRouter<S>,
        name: &str,
        mutating: bool,
        make: impl FnOnce() -> ToolRoute<S>,
    ) -> ToolRouter<S>
    where
        S: Send + Sync + 'static,
    {
        if self.filter.allows(name, mutating) {
            router.with_route(make())
        } else {
            debug!("Tool {} withheld by configuration", name);
            router
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GithubConfig;

    struct Dummy;

    fn registry(exclude: &str, include: &str, read_only: bool) -> ToolRegistry {
        let filter = ToolFilter::new(exclude, include, read_only);
        let config = GithubConfig {
            token: None,
            host: None,
        };
        let client = Arc::new(GithubClient::new(&config).unwrap());
        ToolRegistry::new(filter, client)
    }

    fn names(tools: &[Tool]) -> Vec<String> {
        tools.iter().map(|t| t.name.to_string()).collect()
    }

    #[test]
    fn test_default_registry_exposes_full_catalog() {
        let registry = registry("", "", false);
        assert_eq!(registry.exposed_tools().len(), 29);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (name, _, _) in ToolRegistry::full_catalog() {
            assert!(seen.insert(name), "duplicate tool name: {name}");
        }
    }

    #[test]
    fn test_read_only_registry_keeps_only_read_tools() {
        let registry = registry("", "", true);
        let tools = registry.exposed_tools();
        assert_eq!(tools.len(), 17);
        let listed = names(&tools);
        assert!(listed.contains(&"get_issue".to_string()));
        assert!(!listed.contains(&"create_issue".to_string()));
        assert!(!listed.contains(&"push_files".to_string()));
    }

    #[test]
    fn test_include_list_is_exhaustive() {
        let registry = registry("", "get_me,search_code", false);
        let listed = names(&registry.exposed_tools());
        assert_eq!(listed, vec!["search_code", "get_me"]);
    }

    #[test]
    fn test_exclude_hides_tools() {
        let registry = registry("get_me", "", false);
        let listed = names(&registry.exposed_tools());
        assert_eq!(listed.len(), 28);
        assert!(!listed.contains(&"get_me".to_string()));
    }

    #[test]
    fn test_include_does_not_override_read_only() {
        let registry = registry("", "create_issue,get_issue", true);
        let listed = names(&registry.exposed_tools());
        assert_eq!(listed, vec!["get_issue"]);
    }

    #[test]
    fn test_router_matches_exposed_tools() {
        for (exclude, include, read_only) in [
            ("", "", false),
            ("", "", true),
            ("get_me,list_commits", "", false),
            ("", "get_issue,create_issue,push_files", true),
        ] {
            let registry = registry(exclude, include, read_only);
            let router: ToolRouter<Dummy> = registry.build_router();
            let routed = names(&router.list_all());
            let exposed = names(&registry.exposed_tools());
            let mut routed_sorted = routed.clone();
            routed_sorted.sort();
            let mut exposed_sorted = exposed;
            exposed_sorted.sort();
            assert_eq!(routed_sorted, exposed_sorted);
        }
    }

    #[test]
    fn test_registry_is_deterministic() {
        let a = names(&registry("", "", false).exposed_tools());
        let b = names(&registry("", "", false).exposed_tools());
        assert_eq!(a, b);
    }
}
