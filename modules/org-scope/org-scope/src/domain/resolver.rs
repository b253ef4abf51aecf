//! Role-based scope resolution.
//!
//! Pure function of (acting user, organization snapshot). Every ambiguity
//! narrows the result: the resolver never widens a dimension to `All` for a
//! role that does not get `All` on the happy path.

use std::collections::BTreeSet;
use std::fmt;

use org_scope_sdk::{Role, Scope, ScopeDimension, UserInfo};
use tracing::{debug, warn};

use crate::domain::error::OrgTreeError;
use crate::domain::org_tree::OrgTree;

/// Why a resolution fell back to a narrower scope than the role grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Acting user is not in the directory. Scope is empty.
    UnknownUser,
    /// Acting user is deactivated. Scope is empty.
    Inactive,
    /// HR user without any assigned contract. Scope is empty.
    UnassignedHr,
    /// Manager with no managed department and no own department. Scope is
    /// self-only.
    MissingDepartment,
    /// Cycle, depth overflow or dangling reference. Scope is self-only.
    Integrity(OrgTreeError),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUser => f.write_str("user not found"),
            Self::Inactive => f.write_str("user is inactive"),
            Self::UnassignedHr => f.write_str("hr user has no assigned contracts"),
            Self::MissingDepartment => f.write_str("manager has no department"),
            Self::Integrity(e) => write!(f, "{e}"),
        }
    }
}

/// A resolved scope plus the fallback that produced it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub scope: Scope,
    pub fallback: Option<Fallback>,
}

impl Resolution {
    fn granted(scope: Scope) -> Self {
        Self {
            scope,
            fallback: None,
        }
    }

    pub(crate) fn deny_all(reason: Fallback) -> Self {
        Self {
            scope: Scope::deny_all(),
            fallback: Some(reason),
        }
    }

    fn self_only(user: &UserInfo, reason: Fallback) -> Self {
        Self {
            scope: self_scope(user),
            fallback: Some(reason),
        }
    }
}

fn self_scope(user: &UserInfo) -> Scope {
    Scope::self_only(user.id, user.contract_id, user.department_id)
}

/// Resolves the scope of `user` and logs a warning when it falls back.
#[must_use]
pub fn resolve(user: &UserInfo, tree: &OrgTree) -> Scope {
    let resolution = resolve_with_diagnostics(user, tree);
    if let Some(fallback) = &resolution.fallback {
        warn!(
            user_id = %user.id,
            role = %user.role,
            reason = %fallback,
            "scope resolution fell back"
        );
    }
    resolution.scope
}

/// Resolves the scope of `user` and reports which fallback, if any, applied.
///
/// | Role | contracts | departments | users |
/// |---|---|---|---|
/// | Admin | all | all | all |
/// | Hr | assigned | all | all |
/// | `ProgramManager` | own | all | all |
/// | Manager | own | subtrees of managed departments | reports and self |
/// | Staff | own | own | self |
#[must_use]
pub fn resolve_with_diagnostics(user: &UserInfo, tree: &OrgTree) -> Resolution {
    if !user.active {
        return Resolution::deny_all(Fallback::Inactive);
    }

    if let Err(e) = check_own_references(user, tree) {
        return Resolution::self_only(user, Fallback::Integrity(e));
    }

    match user.role {
        Role::Admin => Resolution::granted(Scope::unrestricted()),
        Role::Hr => {
            if user.assigned_contract_ids.is_empty() {
                Resolution::deny_all(Fallback::UnassignedHr)
            } else {
                Resolution::granted(Scope::contracts(user.assigned_contract_ids.iter().copied()))
            }
        }
        Role::ProgramManager => Resolution::granted(Scope::contracts([user.contract_id])),
        Role::Manager => resolve_manager(user, tree),
        Role::Staff => Resolution::granted(self_scope(user)),
    }
}

/// The acting user's own department and reports-to links must resolve.
fn check_own_references(user: &UserInfo, tree: &OrgTree) -> Result<(), OrgTreeError> {
    if let Some(department_id) = user.department_id
        && !tree.has_department(department_id)
    {
        return Err(OrgTreeError::DanglingReference {
            owner_id: user.id,
            field: "department_id",
            target_id: department_id,
        });
    }

    if let Some(manager_id) = user.reports_to_id
        && !tree.has_user(manager_id)
    {
        return Err(OrgTreeError::DanglingReference {
            owner_id: user.id,
            field: "reports_to_id",
            target_id: manager_id,
        });
    }

    Ok(())
}

fn resolve_manager(user: &UserInfo, tree: &OrgTree) -> Resolution {
    let managed = tree.departments_managed_by(user.id);
    let roots: Vec<_> = if managed.is_empty() {
        user.department_id.into_iter().collect()
    } else {
        managed.to_vec()
    };

    if roots.is_empty() {
        return Resolution::self_only(user, Fallback::MissingDepartment);
    }

    let mut department_ids = BTreeSet::new();
    for root in roots {
        match tree.department_descendants(root) {
            Ok(subtree) => department_ids.extend(subtree),
            Err(e) => return Resolution::self_only(user, Fallback::Integrity(e)),
        }
    }

    let mut user_ids = match tree.direct_and_indirect_reports(user.id) {
        Ok(reports) => reports,
        Err(e) => return Resolution::self_only(user, Fallback::Integrity(e)),
    };
    user_ids.insert(user.id);

    debug!(
        user_id = %user.id,
        departments = department_ids.len(),
        users = user_ids.len(),
        "resolved manager scope"
    );

    Resolution::granted(Scope {
        contract_ids: ScopeDimension::one(user.contract_id),
        department_ids: ScopeDimension::Only(department_ids),
        user_ids: ScopeDimension::Only(user_ids),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use org_scope_sdk::DepartmentInfo;
    use uuid::Uuid;

    const C1: &str = "c1000000-0000-0000-0000-000000000001";
    const C2: &str = "c2000000-0000-0000-0000-000000000002";

    const TS: &str = "d1000000-0000-0000-0000-000000000001";
    const TSM: &str = "d1100000-0000-0000-0000-000000000002";
    const MISSING: &str = "deadbeef-0000-0000-0000-000000000000";

    const ALICE: &str = "a1000000-0000-0000-0000-000000000001";
    const BOB: &str = "a2000000-0000-0000-0000-000000000002";
    const CAROL: &str = "a3000000-0000-0000-0000-000000000003";

    fn id(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap()
    }

    fn dept(d: &str, parent: Option<&str>, managers: &[&str]) -> DepartmentInfo {
        DepartmentInfo {
            id: id(d),
            contract_id: id(C1),
            parent_id: parent.map(id),
            manager_ids: managers.iter().map(|m| id(m)).collect(),
        }
    }

    fn user(u: &str, role: Role, department: Option<&str>, reports_to: Option<&str>) -> UserInfo {
        UserInfo {
            id: id(u),
            contract_id: id(C1),
            department_id: department.map(id),
            reports_to_id: reports_to.map(id),
            role,
            assigned_contract_ids: vec![],
            active: true,
        }
    }

    #[test]
    fn admin_is_unrestricted() {
        let admin = user(ALICE, Role::Admin, None, None);
        let tree = OrgTree::new([], [admin.clone()]);

        assert_eq!(
            resolve_with_diagnostics(&admin, &tree),
            Resolution::granted(Scope::unrestricted())
        );
    }

    #[test]
    fn program_manager_sees_own_contract() {
        let pm = user(ALICE, Role::ProgramManager, Some(TS), None);
        let tree = OrgTree::new([dept(TS, None, &[])], [pm.clone()]);

        assert_eq!(resolve(&pm, &tree), Scope::contracts([id(C1)]));
    }

    #[test]
    fn hr_without_contracts_is_denied() {
        let hr = user(ALICE, Role::Hr, None, None);
        let tree = OrgTree::new([], [hr.clone()]);

        let resolution = resolve_with_diagnostics(&hr, &tree);
        assert!(resolution.scope.is_deny_all());
        assert_eq!(resolution.fallback, Some(Fallback::UnassignedHr));
    }

    #[test]
    fn hr_sees_assigned_contracts_not_own() {
        let hr = UserInfo {
            assigned_contract_ids: vec![id(C2)],
            ..user(ALICE, Role::Hr, None, None)
        };
        let tree = OrgTree::new([], [hr.clone()]);

        assert_eq!(resolve(&hr, &tree), Scope::contracts([id(C2)]));
    }

    #[test]
    fn inactive_user_is_denied_regardless_of_role() {
        for role in [
            Role::Admin,
            Role::Hr,
            Role::ProgramManager,
            Role::Manager,
            Role::Staff,
        ] {
            let inactive = UserInfo {
                active: false,
                ..user(ALICE, role, None, None)
            };
            let tree = OrgTree::new([], [inactive.clone()]);

            let resolution = resolve_with_diagnostics(&inactive, &tree);
            assert!(resolution.scope.is_deny_all(), "role {role}");
            assert_eq!(resolution.fallback, Some(Fallback::Inactive));
        }
    }

    #[test]
    fn dangling_department_falls_back_to_self_only() {
        for role in [Role::Admin, Role::ProgramManager, Role::Manager, Role::Staff] {
            let acting = user(ALICE, role, Some(MISSING), None);
            let tree = OrgTree::new([dept(TS, None, &[ALICE])], [acting.clone()]);

            let resolution = resolve_with_diagnostics(&acting, &tree);
            assert_eq!(
                resolution.scope,
                Scope::self_only(id(ALICE), id(C1), Some(id(MISSING))),
                "role {role}"
            );
            assert!(matches!(
                resolution.fallback,
                Some(Fallback::Integrity(OrgTreeError::DanglingReference {
                    field: "department_id",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn dangling_reports_to_falls_back_to_self_only() {
        let acting = user(ALICE, Role::Manager, Some(TS), Some(MISSING));
        let tree = OrgTree::new([dept(TS, None, &[ALICE])], [acting.clone()]);

        let resolution = resolve_with_diagnostics(&acting, &tree);
        assert_eq!(
            resolution.scope,
            Scope::self_only(id(ALICE), id(C1), Some(id(TS)))
        );
        assert!(resolution.fallback.is_some());
    }

    #[test]
    fn manager_without_any_department_is_self_only() {
        let manager = user(ALICE, Role::Manager, None, None);
        let tree = OrgTree::new([], [manager.clone()]);

        let resolution = resolve_with_diagnostics(&manager, &tree);
        assert_eq!(resolution.scope, Scope::self_only(id(ALICE), id(C1), None));
        assert_eq!(resolution.fallback, Some(Fallback::MissingDepartment));
        assert!(!resolution.scope.department_ids.is_all());
        assert!(!resolution.scope.user_ids.is_all());
    }

    #[test]
    fn manager_not_listed_uses_own_department_subtree() {
        let manager = user(ALICE, Role::Manager, Some(TS), None);
        let tree = OrgTree::new(
            [dept(TS, None, &[]), dept(TSM, Some(TS), &[])],
            [manager.clone()],
        );

        let scope = resolve(&manager, &tree);
        assert_eq!(scope.department_ids, ScopeDimension::only([id(TS), id(TSM)]));
        assert_eq!(scope.user_ids, ScopeDimension::one(id(ALICE)));
    }

    #[test]
    fn manager_includes_reports_and_self() {
        let manager = user(ALICE, Role::Manager, Some(TS), None);
        let report = user(BOB, Role::Staff, Some(TSM), Some(ALICE));
        let indirect = user(CAROL, Role::Staff, Some(TSM), Some(BOB));
        let tree = OrgTree::new(
            [dept(TS, None, &[ALICE]), dept(TSM, Some(TS), &[])],
            [manager.clone(), report, indirect],
        );

        let scope = resolve(&manager, &tree);
        assert_eq!(
            scope.user_ids,
            ScopeDimension::only([id(ALICE), id(BOB), id(CAROL)])
        );
        assert_eq!(scope.contract_ids, ScopeDimension::one(id(C1)));
    }

    #[test]
    fn manager_reporting_cycle_falls_back() {
        // BOB reports to ALICE, ALICE reports to BOB
        let manager = user(ALICE, Role::Manager, Some(TS), Some(BOB));
        let report = user(BOB, Role::Staff, Some(TS), Some(ALICE));
        let tree = OrgTree::new([dept(TS, None, &[ALICE])], [manager.clone(), report]);

        let resolution = resolve_with_diagnostics(&manager, &tree);
        assert_eq!(
            resolution.scope,
            Scope::self_only(id(ALICE), id(C1), Some(id(TS)))
        );
        assert!(matches!(
            resolution.fallback,
            Some(Fallback::Integrity(OrgTreeError::ReportingCycle { .. }))
        ));
    }

    #[test]
    fn manager_depth_overflow_falls_back() {
        let manager = user(ALICE, Role::Manager, Some(TS), None);
        let tree = OrgTree::new(
            [dept(TS, None, &[ALICE]), dept(TSM, Some(TS), &[])],
            [manager.clone()],
        )
        .with_max_depth(0);

        let resolution = resolve_with_diagnostics(&manager, &tree);
        assert!(matches!(
            resolution.fallback,
            Some(Fallback::Integrity(OrgTreeError::DepthExceeded { .. }))
        ));
        assert_eq!(
            resolution.scope.department_ids,
            ScopeDimension::one(id(TS))
        );
    }

    #[test]
    fn staff_is_self_only() {
        let staff = user(BOB, Role::Staff, Some(TSM), Some(ALICE));
        let tree = OrgTree::new(
            [dept(TS, None, &[]), dept(TSM, Some(TS), &[])],
            [user(ALICE, Role::Manager, Some(TS), None), staff.clone()],
        );

        let resolution = resolve_with_diagnostics(&staff, &tree);
        assert_eq!(resolution.fallback, None);
        assert_eq!(
            resolution.scope,
            Scope::self_only(id(BOB), id(C1), Some(id(TSM)))
        );
    }

    #[test]
    fn fallback_display() {
        assert_eq!(Fallback::Inactive.to_string(), "user is inactive");
        let integrity = Fallback::Integrity(OrgTreeError::DepartmentCycle {
            department_id: id(TS),
        });
        assert!(integrity.to_string().contains(TS));
    }
}
