//! Resource domain: `repo://` templates and the service resolving them to
//! repository contents.

mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::repo_content_templates;
pub use service::{RepoContentRef, RepoResourceService, parse_repo_uri};
