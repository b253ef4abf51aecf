//! Domain errors.

use org_scope_sdk::OrgScopeError;
use thiserror::Error;
use uuid::Uuid;

/// Integrity problems found while reading or checking the organization tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrgTreeError {
    #[error("department cycle detected at {department_id}")]
    DepartmentCycle { department_id: Uuid },

    #[error("reporting cycle detected at {user_id}")]
    ReportingCycle { user_id: Uuid },

    #[error("department not found: {department_id}")]
    DepartmentNotFound { department_id: Uuid },

    #[error("user not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("department {department_id} cannot have parent {parent_id} from another contract")]
    CrossContractParent { department_id: Uuid, parent_id: Uuid },

    #[error("hierarchy below {root_id} exceeds max depth {max_depth}")]
    DepthExceeded { root_id: Uuid, max_depth: usize },

    #[error("{field} of {owner_id} points to missing row {target_id}")]
    DanglingReference {
        owner_id: Uuid,
        field: &'static str,
        target_id: Uuid,
    },
}

impl OrgTreeError {
    /// ID of the department or user the problem was found on.
    #[must_use]
    pub fn row_id(&self) -> Uuid {
        match self {
            Self::DepartmentCycle { department_id }
            | Self::DepartmentNotFound { department_id }
            | Self::CrossContractParent { department_id, .. } => *department_id,
            Self::ReportingCycle { user_id } | Self::UserNotFound { user_id } => *user_id,
            Self::DepthExceeded { root_id, .. } => *root_id,
            Self::DanglingReference { owner_id, .. } => *owner_id,
        }
    }
}

/// Errors returned by the domain service.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("directory error: {0}")]
    Directory(#[from] OrgScopeError),

    #[error("integrity error: {0}")]
    Integrity(#[from] OrgTreeError),
}

impl From<DomainError> for OrgScopeError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Directory(inner) => inner,
            DomainError::Integrity(inner) => OrgScopeError::Internal(inner.to_string()),
        }
    }
}
