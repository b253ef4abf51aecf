//! Organization directory models.
//!
//! These are the rows the scope resolver reads from the persistence layer.
//! They carry only the attributes that take part in scope resolution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contract identifier. A contract is the outermost data-isolation unit.
pub type ContractId = Uuid;

/// Department identifier.
pub type DepartmentId = Uuid;

/// User identifier.
pub type UserId = Uuid;

/// Role of an acting user.
///
/// Deserialization accepts the snake-case names as well as the upper-case
/// names and aliases used by the tracker (`TECH_LEAD`, `BENEFICIARY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "ADMIN")]
    Admin,
    #[serde(alias = "HR")]
    Hr,
    #[serde(alias = "PROGRAM_MANAGER")]
    ProgramManager,
    #[serde(alias = "MANAGER", alias = "tech_lead", alias = "TECH_LEAD")]
    Manager,
    #[serde(alias = "STAFF", alias = "beneficiary", alias = "BENEFICIARY")]
    Staff,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::ProgramManager => "program_manager",
            Self::Manager => "manager",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A department row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    pub id: DepartmentId,
    pub contract_id: ContractId,
    /// Parent department. `None` for top-level departments.
    #[serde(default)]
    pub parent_id: Option<DepartmentId>,
    /// Users recorded as managers of this department.
    ///
    /// A user may appear in the manager list of several departments.
    #[serde(default)]
    pub manager_ids: Vec<UserId>,
}

/// A user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    pub contract_id: ContractId,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Management chain link, independent of department membership.
    #[serde(default)]
    pub reports_to_id: Option<UserId>,
    pub role: Role,
    /// Contracts explicitly assigned to an HR user (many-to-many).
    /// Ignored for every other role.
    #[serde(default)]
    pub assigned_contract_ids: Vec<ContractId>,
    /// Soft-deactivation flag; offboarded users are inactive.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn role_accepts_tracker_aliases() {
        let cases = [
            ("\"admin\"", Role::Admin),
            ("\"HR\"", Role::Hr),
            ("\"PROGRAM_MANAGER\"", Role::ProgramManager),
            ("\"TECH_LEAD\"", Role::Manager),
            ("\"manager\"", Role::Manager),
            ("\"BENEFICIARY\"", Role::Staff),
            ("\"staff\"", Role::Staff),
        ];
        for (raw, expected) in cases {
            let role: Role = serde_json::from_str(raw).unwrap();
            assert_eq!(role, expected, "input {raw}");
        }
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::ProgramManager).unwrap();
        assert_eq!(json, "\"program_manager\"");
        assert_eq!(Role::Manager.to_string(), "manager");
    }

    #[test]
    fn user_defaults_to_active_without_links() {
        let user: UserInfo = serde_json::from_str(
            r#"{
                "id": "11111111-1111-1111-1111-111111111111",
                "contract_id": "22222222-2222-2222-2222-222222222222",
                "role": "staff"
            }"#,
        )
        .unwrap();

        assert!(user.active);
        assert!(user.department_id.is_none());
        assert!(user.reports_to_id.is_none());
        assert!(user.assigned_contract_ids.is_empty());
    }
}
