//! Directory API trait implemented by organization data sources.

use async_trait::async_trait;

use crate::error::OrgScopeError;
use crate::models::{ContractId, DepartmentId, DepartmentInfo, UserId, UserInfo};

/// Read access to the organization rows the scope resolver needs.
///
/// This is the seam to the persistence layer. Implementations return
/// `Ok(None)` for missing rows and reserve errors for transport or storage
/// failures.
#[async_trait]
pub trait OrgDirectoryClient: Send + Sync {
    /// Get a user by ID.
    async fn get_user(&self, id: UserId) -> Result<Option<UserInfo>, OrgScopeError>;

    /// Get a department by ID.
    async fn get_department(&self, id: DepartmentId)
    -> Result<Option<DepartmentInfo>, OrgScopeError>;

    /// All departments of a contract, in any order.
    async fn list_departments(
        &self,
        contract_id: ContractId,
    ) -> Result<Vec<DepartmentInfo>, OrgScopeError>;

    /// All users of a contract, in any order.
    async fn list_users(&self, contract_id: ContractId) -> Result<Vec<UserInfo>, OrgScopeError>;
}
