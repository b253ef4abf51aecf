//! Domain service for the static org directory plugin.

use std::collections::HashMap;

use org_scope_sdk::{ContractId, DepartmentId, DepartmentInfo, UserId, UserInfo};
use tracing::debug;

use crate::config::StaticOrgPluginConfig;

/// Static org directory service.
///
/// Holds the configured rows in memory. Rows are never validated here:
/// cycles and dangling references are passed through so the scope resolver
/// sees exactly what the configuration says.
pub struct Service {
    departments: HashMap<DepartmentId, DepartmentInfo>,
    users: HashMap<UserId, UserInfo>,
}

impl Service {
    /// Creates a new service from configuration. Later entries win on
    /// duplicate IDs.
    #[must_use]
    pub fn from_config(cfg: &StaticOrgPluginConfig) -> Self {
        let departments: HashMap<DepartmentId, DepartmentInfo> = cfg
            .departments
            .iter()
            .map(|d| (d.id, DepartmentInfo::from(d)))
            .collect();

        let users: HashMap<UserId, UserInfo> = cfg
            .users
            .iter()
            .map(|u| (u.id, UserInfo::from(u)))
            .collect();

        debug!(
            departments = departments.len(),
            users = users.len(),
            "loaded static org directory"
        );

        Self { departments, users }
    }

    pub(crate) fn user(&self, id: UserId) -> Option<&UserInfo> {
        self.users.get(&id)
    }

    pub(crate) fn department(&self, id: DepartmentId) -> Option<&DepartmentInfo> {
        self.departments.get(&id)
    }

    /// Departments of a contract, sorted by ID.
    pub(crate) fn departments_of(&self, contract_id: ContractId) -> Vec<DepartmentInfo> {
        let mut out: Vec<DepartmentInfo> = self
            .departments
            .values()
            .filter(|d| d.contract_id == contract_id)
            .cloned()
            .collect();
        out.sort_by_key(|d| d.id);
        out
    }

    /// Users of a contract, sorted by ID.
    pub(crate) fn users_of(&self, contract_id: ContractId) -> Vec<UserInfo> {
        let mut out: Vec<UserInfo> = self
            .users
            .values()
            .filter(|u| u.contract_id == contract_id)
            .cloned()
            .collect();
        out.sort_by_key(|u| u.id);
        out
    }

    /// Every contract that owns at least one configured row, sorted.
    #[must_use]
    pub fn contract_ids(&self) -> Vec<ContractId> {
        let mut out: Vec<ContractId> = self
            .departments
            .values()
            .map(|d| d.contract_id)
            .chain(self.users.values().map(|u| u.contract_id))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
