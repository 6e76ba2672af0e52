//! Tool definitions, grouped by the GitHub API surface they cover.
//!
//! Every tool follows the same shape: a unit struct with `NAME` and
//! `DESCRIPTION` constants, a `to_tool()` describing its input schema,
//! a `create_route()` wiring it into a [`ToolRouter`], and an `execute()`
//! holding the actual behaviour.
//!
//! [`ToolRouter`]: rmcp::handler::server::router::tool::ToolRouter

pub mod code_scanning;
pub mod common;
pub mod issues;
pub mod pulls;
pub mod repos;
pub mod search;
pub mod users;

pub use code_scanning::{GetCodeScanningAlertTool, ListCodeScanningAlertsTool};
pub use issues::{
    AddIssueCommentTool, CreateIssueTool, GetIssueTool, ListIssuesTool, SearchIssuesTool,
    UpdateIssueTool,
};
pub use pulls::{
    CreatePullRequestReviewTool, CreatePullRequestTool, GetPullRequestCommentsTool,
    GetPullRequestFilesTool, GetPullRequestReviewsTool, GetPullRequestStatusTool,
    GetPullRequestTool, ListPullRequestsTool, MergePullRequestTool, UpdatePullRequestBranchTool,
};
pub use repos::{
    CreateBranchTool, CreateOrUpdateFileTool, CreateRepositoryTool, ForkRepositoryTool,
    GetFileContentsTool, ListCommitsTool, PushFilesTool, SearchRepositoriesTool,
};
pub use search::{SearchCodeTool, SearchUsersTool};
pub use users::GetMeTool;
