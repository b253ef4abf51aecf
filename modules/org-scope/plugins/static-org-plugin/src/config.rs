//! Configuration for the static org directory plugin.

use org_scope_sdk::{DepartmentInfo, Role, UserInfo};
use serde::Deserialize;
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticOrgPluginConfig {
    /// Static department definitions.
    pub departments: Vec<DepartmentConfig>,

    /// Static user definitions.
    pub users: Vec<UserConfig>,
}

/// Configuration for a single department.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentConfig {
    /// Department ID.
    pub id: Uuid,

    /// Display name, informational only.
    #[serde(default)]
    pub name: Option<String>,

    /// Owning contract.
    pub contract_id: Uuid,

    /// Parent department ID. `None` for top-level departments.
    #[serde(default)]
    pub parent_id: Option<Uuid>,

    /// Users managing this department.
    #[serde(default)]
    pub manager_ids: Vec<Uuid>,
}

/// Configuration for a single user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// User ID.
    pub id: Uuid,

    /// Display name, informational only.
    #[serde(default)]
    pub name: Option<String>,

    /// Home contract.
    pub contract_id: Uuid,

    #[serde(default)]
    pub department_id: Option<Uuid>,

    #[serde(default)]
    pub reports_to_id: Option<Uuid>,

    pub role: Role,

    /// Contracts an HR user is assigned to.
    #[serde(default)]
    pub assigned_contract_ids: Vec<Uuid>,

    /// Soft-deactivation flag (defaults to active).
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&DepartmentConfig> for DepartmentInfo {
    fn from(cfg: &DepartmentConfig) -> Self {
        Self {
            id: cfg.id,
            contract_id: cfg.contract_id,
            parent_id: cfg.parent_id,
            manager_ids: cfg.manager_ids.clone(),
        }
    }
}

impl From<&UserConfig> for UserInfo {
    fn from(cfg: &UserConfig) -> Self {
        Self {
            id: cfg.id,
            contract_id: cfg.contract_id,
            department_id: cfg.department_id,
            reports_to_id: cfg.reports_to_id,
            role: cfg.role,
            assigned_contract_ids: cfg.assigned_contract_ids.clone(),
            active: cfg.active,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Figment;
    use figment::providers::{Format, Yaml};

    #[test]
    fn parses_yaml_with_role_aliases_and_defaults() {
        let yaml = r#"
departments:
  - id: "d1000000-0000-0000-0000-000000000001"
    name: "Technical Services"
    contract_id: "c1000000-0000-0000-0000-000000000001"
users:
  - id: "a1000000-0000-0000-0000-000000000001"
    contract_id: "c1000000-0000-0000-0000-000000000001"
    role: TECH_LEAD
  - id: "a2000000-0000-0000-0000-000000000002"
    contract_id: "c1000000-0000-0000-0000-000000000001"
    role: BENEFICIARY
    active: false
"#;

        let cfg: StaticOrgPluginConfig = Figment::from(Yaml::string(yaml)).extract().unwrap();

        assert_eq!(cfg.departments.len(), 1);
        assert_eq!(cfg.departments[0].parent_id, None);
        assert!(cfg.departments[0].manager_ids.is_empty());
        assert_eq!(cfg.users[0].role, Role::Manager);
        assert!(cfg.users[0].active);
        assert_eq!(cfg.users[1].role, Role::Staff);
        assert!(!cfg.users[1].active);
    }

    #[test]
    fn rejects_unknown_fields() {
        let yaml = r#"
users:
  - id: "a1000000-0000-0000-0000-000000000001"
    contract_id: "c1000000-0000-0000-0000-000000000001"
    role: staff
    salary: 10
"#;

        let result: Result<StaticOrgPluginConfig, _> = Figment::from(Yaml::string(yaml)).extract();
        assert!(result.is_err());
    }
}
