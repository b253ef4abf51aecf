//! Configuration for the org scope module.

use serde::Deserialize;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrgScopeConfig {
    /// Maximum number of levels a department or reporting traversal may
    /// descend below its starting node.
    ///
    /// Deeper hierarchies are treated like corrupted data: the acting user
    /// falls back to a self-only scope.
    pub max_traversal_depth: usize,
}

impl Default for OrgScopeConfig {
    fn default() -> Self {
        Self {
            max_traversal_depth: DEFAULT_MAX_TRAVERSAL_DEPTH,
        }
    }
}

pub const DEFAULT_MAX_TRAVERSAL_DEPTH: usize = 64;
