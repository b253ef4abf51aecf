//! Error types for the org-scope module.

use thiserror::Error;

/// Errors that can occur when using the org-scope API.
///
/// Organizational data problems (cycles, dangling references, unassigned
/// roles) never surface here; they resolve to a narrower scope instead.
#[derive(Debug, Error)]
pub enum OrgScopeError {
    /// The organization directory could not be read.
    #[error("directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
