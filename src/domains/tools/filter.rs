//! Capability filter deciding which tools a server instance exposes.
//!
//! The filter is built once from configuration and consulted at catalog
//! build time. It never errors: a tool that fails its gate is simply left
//! out of the catalog, indistinguishable to the caller from a tool that was
//! never implemented.

use std::collections::HashSet;

use crate::core::config::ToolsConfig;

/// Immutable include/exclude/read-only gate over tool names.
#[derive(Debug, Clone)]
pub struct ToolFilter {
    exclude: HashSet<String>,
    include: HashSet<String>,
    read_only: bool,
}

impl ToolFilter {
    /// Build a filter from raw comma-separated name lists.
    pub fn new(exclude_tools: &str, include_tools: &str, read_only: bool) -> Self {
        Self {
            exclude: parse_name_list(exclude_tools),
            include: parse_name_list(include_tools),
            read_only,
        }
    }

    /// Build a filter from the tools configuration.
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(
            &config.exclude_tools,
            &config.include_tools,
            config.read_only,
        )
    }

    /// Whether the named tool is exposed.
    ///
    /// A non-empty include list is authoritative: only tools on it are
    /// exposed and the exclude list is not consulted. Otherwise every tool
    /// not on the exclude list is exposed.
    pub fn is_exposed(&self, name: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.contains(name);
        }
        !self.exclude.contains(name)
    }

    /// Whether the server runs in read-only mode.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// The double gate applied at registration time: mutating tools are
    /// registered only when read-only mode is off *and* the name passes
    /// the include/exclude gate.
    pub fn allows(&self, name: &str, mutating: bool) -> bool {
        if mutating && self.read_only {
            return false;
        }
        self.is_exposed(name)
    }
}

/// Split a comma-separated list of tool names, trimming whitespace and
/// dropping empty entries.
fn parse_name_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_exposes_everything() {
        let filter = ToolFilter::new("", "", false);
        assert!(filter.is_exposed("get_issue"));
        assert!(filter.is_exposed("anything_at_all"));
    }

    #[test]
    fn test_exclude_list_hides_named_tools() {
        let filter = ToolFilter::new("b", "", false);
        assert!(filter.is_exposed("a"));
        assert!(!filter.is_exposed("b"));
    }

    #[test]
    fn test_include_list_wins_over_exclude() {
        // "a" is on both lists; the include list is authoritative.
        let filter = ToolFilter::new("a,b", "a", false);
        assert!(filter.is_exposed("a"));
        assert!(!filter.is_exposed("b"));
    }

    #[test]
    fn test_include_list_is_exhaustive() {
        let filter = ToolFilter::new("", "a", false);
        assert!(filter.is_exposed("a"));
        assert!(!filter.is_exposed("c"));
    }

    #[test]
    fn test_name_lists_are_trimmed() {
        let filter = ToolFilter::new(" b ,  , c", "", false);
        assert!(!filter.is_exposed("b"));
        assert!(!filter.is_exposed("c"));
        assert!(filter.is_exposed("a"));
        // the empty entry between commas must not exclude the empty name
        assert!(filter.is_exposed(""));
    }

    #[test]
    fn test_read_only_gates_mutating_tools() {
        let filter = ToolFilter::new("", "", true);
        assert!(filter.allows("get_issue", false));
        assert!(!filter.allows("create_issue", true));
    }

    #[test]
    fn test_read_only_does_not_override_include() {
        // Included but mutating in read-only mode: both gates are required.
        let filter = ToolFilter::new("", "create_issue", true);
        assert!(!filter.allows("create_issue", true));
    }

    #[test]
    fn test_mutating_allowed_when_not_read_only() {
        let filter = ToolFilter::new("", "", false);
        assert!(filter.allows("create_issue", true));
    }
}
