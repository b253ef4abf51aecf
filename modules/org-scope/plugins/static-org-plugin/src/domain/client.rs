//! Directory client implementation for the static org directory plugin.

use async_trait::async_trait;
use org_scope_sdk::{
    ContractId, DepartmentId, DepartmentInfo, OrgDirectoryClient, OrgScopeError, UserId,
    UserInfo,
};

use super::service::Service;

#[async_trait]
impl OrgDirectoryClient for Service {
    async fn get_user(&self, id: UserId) -> Result<Option<UserInfo>, OrgScopeError> {
        Ok(self.user(id).cloned())
    }

    async fn get_department(
        &self,
        id: DepartmentId,
    ) -> Result<Option<DepartmentInfo>, OrgScopeError> {
        Ok(self.department(id).cloned())
    }

    async fn list_departments(
        &self,
        contract_id: ContractId,
    ) -> Result<Vec<DepartmentInfo>, OrgScopeError> {
        Ok(self.departments_of(contract_id))
    }

    async fn list_users(&self, contract_id: ContractId) -> Result<Vec<UserInfo>, OrgScopeError> {
        Ok(self.users_of(contract_id))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::{DepartmentConfig, StaticOrgPluginConfig, UserConfig};
    use org_scope_sdk::Role;
    use uuid::Uuid;

    const CONTRACT: &str = "c1000000-0000-0000-0000-000000000001";
    const DEPT: &str = "d1000000-0000-0000-0000-000000000001";
    const HR: &str = "a1000000-0000-0000-0000-000000000001";

    fn id(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    fn service() -> Service {
        Service::from_config(&StaticOrgPluginConfig {
            departments: vec![DepartmentConfig {
                id: id(DEPT),
                name: Some("Technical Services".to_owned()),
                contract_id: id(CONTRACT),
                parent_id: None,
                manager_ids: vec![],
            }],
            users: vec![UserConfig {
                id: id(HR),
                name: None,
                contract_id: id(CONTRACT),
                department_id: Some(id(DEPT)),
                reports_to_id: None,
                role: Role::Hr,
                assigned_contract_ids: vec![id(CONTRACT)],
                active: true,
            }],
        })
    }

    #[tokio::test]
    async fn get_user_returns_configured_row() {
        let client: &dyn OrgDirectoryClient = &service();

        let user = client.get_user(id(HR)).await.unwrap().unwrap();

        assert_eq!(user.role, Role::Hr);
        assert_eq!(user.assigned_contract_ids, vec![id(CONTRACT)]);
    }

    #[tokio::test]
    async fn missing_rows_are_none_not_errors() {
        let client: &dyn OrgDirectoryClient = &service();

        assert!(client.get_user(Uuid::nil()).await.unwrap().is_none());
        assert!(client.get_department(Uuid::nil()).await.unwrap().is_none());
        assert!(client.list_users(Uuid::nil()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_departments_by_contract() {
        let client: &dyn OrgDirectoryClient = &service();

        let departments = client.list_departments(id(CONTRACT)).await.unwrap();

        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].id, id(DEPT));
    }
}
