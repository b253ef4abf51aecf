//! Domain service for the org scope module.
//!
//! Loads a per-request organization snapshot through the directory client
//! and runs the pure resolver over it.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use org_scope_sdk::{
    ContractId, DepartmentId, OrgDirectoryClient, ResourceRef, Role, Scope, UserId, UserInfo,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{DomainError, OrgTreeError};
use super::org_tree::OrgTree;
use super::resolver::{Fallback, Resolution, resolve_with_diagnostics};
use crate::config::OrgScopeConfig;

/// Org scope service.
///
/// Stateless between calls: every resolution reads a fresh snapshot.
pub struct Service {
    directory: Arc<dyn OrgDirectoryClient>,
    config: OrgScopeConfig,
}

impl Service {
    #[must_use]
    pub fn new(directory: Arc<dyn OrgDirectoryClient>, config: OrgScopeConfig) -> Self {
        Self { directory, config }
    }

    /// Resolve the acting user's scope with the fallback that applied.
    ///
    /// Unknown users resolve to an empty scope.
    ///
    /// # Errors
    ///
    /// - `Directory` if the directory cannot be read
    #[tracing::instrument(skip_all, fields(user.id = %user_id))]
    pub async fn resolve(&self, user_id: UserId) -> Result<Resolution, DomainError> {
        let Some(user) = self.directory.get_user(user_id).await? else {
            warn!("acting user not found, denying all");
            return Ok(Resolution::deny_all(Fallback::UnknownUser));
        };

        let tree = self.load_snapshot(&user).await?;
        let resolution = resolve_with_diagnostics(&user, &tree);

        if let Some(fallback) = &resolution.fallback {
            warn!(role = %user.role, reason = %fallback, "scope resolution fell back");
        } else {
            debug!(role = %user.role, "scope resolved");
        }

        Ok(resolution)
    }

    /// Resolve the acting user's scope.
    ///
    /// # Errors
    ///
    /// - `Directory` if the directory cannot be read
    pub async fn resolve_scope(&self, user_id: UserId) -> Result<Scope, DomainError> {
        Ok(self.resolve(user_id).await?.scope)
    }

    /// Resolve the acting user's scope and check one resource against it.
    ///
    /// # Errors
    ///
    /// - `Directory` if the directory cannot be read
    pub async fn is_visible(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
    ) -> Result<bool, DomainError> {
        Ok(self.resolve_scope(user_id).await?.is_visible(resource))
    }

    /// List every integrity problem within one contract.
    ///
    /// Parents and managers missing from the contract listing are looked up
    /// by ID, so a parent in another contract is reported as
    /// `CrossContractParent` and only rows that do not exist at all as
    /// dangling references. Problems on those looked-up rows are not part
    /// of the report.
    ///
    /// # Errors
    ///
    /// - `Directory` if the directory cannot be read
    #[tracing::instrument(skip_all, fields(contract.id = %contract_id))]
    pub async fn validate_contract(
        &self,
        contract_id: ContractId,
    ) -> Result<Vec<OrgTreeError>, DomainError> {
        let mut departments = self.directory.list_departments(contract_id).await?;
        let mut users = self.directory.list_users(contract_id).await?;

        let listed: HashSet<Uuid> = departments
            .iter()
            .map(|d| d.id)
            .chain(users.iter().map(|u| u.id))
            .collect();

        let parent_ids: BTreeSet<DepartmentId> = departments
            .iter()
            .filter_map(|d| d.parent_id)
            .filter(|id| !listed.contains(id))
            .collect();
        let manager_ids: BTreeSet<UserId> = departments
            .iter()
            .flat_map(|d| d.manager_ids.iter().copied())
            .chain(users.iter().filter_map(|u| u.reports_to_id))
            .filter(|id| !listed.contains(id))
            .collect();

        for parent_id in parent_ids {
            if let Some(parent) = self.directory.get_department(parent_id).await? {
                departments.push(parent);
            }
        }
        for manager_id in manager_ids {
            if let Some(manager) = self.directory.get_user(manager_id).await? {
                users.push(manager);
            }
        }

        let mut issues = OrgTree::new(departments, users)
            .with_max_depth(self.config.max_traversal_depth)
            .integrity_issues();
        issues.retain(|issue| listed.contains(&issue.row_id()));

        info!(issues = issues.len(), "validated contract organization");
        Ok(issues)
    }

    /// Reads the rows the acting user's role needs.
    ///
    /// Managers need the whole contract to walk subtrees and reporting
    /// chains; every other role only needs its own references checked.
    async fn load_snapshot(&self, user: &UserInfo) -> Result<OrgTree, DomainError> {
        let (mut departments, mut users) = if user.role == Role::Manager {
            let departments = self.directory.list_departments(user.contract_id).await?;
            let mut users = self.directory.list_users(user.contract_id).await?;
            if !users.iter().any(|u| u.id == user.id) {
                users.push(user.clone());
            }
            (departments, users)
        } else {
            (Vec::new(), vec![user.clone()])
        };

        // Own references may point outside the contract listing.
        if let Some(department_id) = user.department_id
            && !departments.iter().any(|d| d.id == department_id)
            && let Some(department) = self.directory.get_department(department_id).await?
        {
            departments.push(department);
        }
        if let Some(manager_id) = user.reports_to_id
            && !users.iter().any(|u| u.id == manager_id)
            && let Some(manager) = self.directory.get_user(manager_id).await?
        {
            users.push(manager);
        }

        Ok(OrgTree::new(departments, users).with_max_depth(self.config.max_traversal_depth))
    }
}
