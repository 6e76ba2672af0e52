//! Resource templates describing repository content URIs.
//!
//! All templates resolve to the same contents endpoint; they differ only in
//! how the git reference is spelled inside the URI.

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};

fn template(uri_template: &str, name: &str, description: &str) -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: uri_template.to_string(),
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        mime_type: None,
    }
    .no_annotation()
}

/// All repository content templates, in the order clients see them.
pub fn repo_content_templates() -> Vec<ResourceTemplate> {
    vec![
        template(
            "repo://{owner}/{repo}/contents{/path*}",
            "Repository Content",
            "Content of a file or directory on the default branch",
        ),
        template(
            "repo://{owner}/{repo}/refs/heads/{branch}/contents{/path*}",
            "Repository Content for specific branch",
            "Content of a file or directory on a branch",
        ),
        template(
            "repo://{owner}/{repo}/sha/{sha}/contents{/path*}",
            "Repository Content for specific commit",
            "Content of a file or directory at a commit",
        ),
        template(
            "repo://{owner}/{repo}/refs/tags/{tag}/contents{/path*}",
            "Repository Content for specific tag",
            "Content of a file or directory at a tag",
        ),
        template(
            "repo://{owner}/{repo}/refs/pull/{prNumber}/head/contents{/path*}",
            "Repository Content for specific pull request",
            "Content of a file or directory at the head of a pull request",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_all_target_contents() {
        let templates = repo_content_templates();
        assert_eq!(templates.len(), 5);
        for t in &templates {
            assert!(t.raw.uri_template.starts_with("repo://{owner}/{repo}/"));
            assert!(t.raw.uri_template.ends_with("/contents{/path*}"));
        }
    }
}
