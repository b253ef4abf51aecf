//! Organization tree snapshot.
//!
//! Holds departments and users as explicit adjacency maps and answers the
//! two traversals scope resolution needs: department subtrees and reporting
//! subtrees. Traversals are iterative with a visited set, so a corrupted
//! snapshot with a cycle ends in an error instead of a hang.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use org_scope_sdk::{DepartmentId, DepartmentInfo, UserId, UserInfo};

use crate::config::DEFAULT_MAX_TRAVERSAL_DEPTH;
use crate::domain::error::OrgTreeError;

/// Read-only snapshot of one or more contracts' organization data.
#[derive(Debug, Clone)]
pub struct OrgTree {
    departments: HashMap<DepartmentId, DepartmentInfo>,
    users: HashMap<UserId, UserInfo>,

    /// Children index: `parent_id` -> child department IDs.
    children: HashMap<DepartmentId, Vec<DepartmentId>>,

    /// Reporting index: `reports_to_id` -> direct report user IDs.
    direct_reports: HashMap<UserId, Vec<UserId>>,

    /// Reverse manager index: user -> departments listing the user as manager.
    managed: HashMap<UserId, Vec<DepartmentId>>,

    max_depth: usize,
}

impl OrgTree {
    /// Builds a snapshot and its indexes. Later rows win on duplicate IDs.
    #[must_use]
    pub fn new<D, U>(departments: D, users: U) -> Self
    where
        D: IntoIterator<Item = DepartmentInfo>,
        U: IntoIterator<Item = UserInfo>,
    {
        let departments: HashMap<DepartmentId, DepartmentInfo> =
            departments.into_iter().map(|d| (d.id, d)).collect();
        let users: HashMap<UserId, UserInfo> = users.into_iter().map(|u| (u.id, u)).collect();

        let mut children: HashMap<DepartmentId, Vec<DepartmentId>> = HashMap::new();
        let mut managed: HashMap<UserId, Vec<DepartmentId>> = HashMap::new();
        for department in departments.values() {
            if let Some(parent_id) = department.parent_id {
                children.entry(parent_id).or_default().push(department.id);
            }
            for manager_id in &department.manager_ids {
                managed.entry(*manager_id).or_default().push(department.id);
            }
        }

        let mut direct_reports: HashMap<UserId, Vec<UserId>> = HashMap::new();
        for user in users.values() {
            if let Some(manager_id) = user.reports_to_id {
                direct_reports.entry(manager_id).or_default().push(user.id);
            }
        }

        for ids in managed.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }

        Self {
            departments,
            users,
            children,
            direct_reports,
            managed,
            max_depth: DEFAULT_MAX_TRAVERSAL_DEPTH,
        }
    }

    /// Sets the traversal depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn department(&self, id: DepartmentId) -> Option<&DepartmentInfo> {
        self.departments.get(&id)
    }

    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&UserInfo> {
        self.users.get(&id)
    }

    #[must_use]
    pub fn has_department(&self, id: DepartmentId) -> bool {
        self.departments.contains_key(&id)
    }

    #[must_use]
    pub fn has_user(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Departments that list `user_id` among their managers, sorted by ID.
    #[must_use]
    pub fn departments_managed_by(&self, user_id: UserId) -> &[DepartmentId] {
        self.managed.get(&user_id).map_or(&[], Vec::as_slice)
    }

    /// The department itself plus every department reachable through child
    /// links.
    ///
    /// # Errors
    ///
    /// - `DepartmentNotFound` if `department_id` is not in the snapshot
    /// - `DepartmentCycle` if the traversal returns to a visited department
    /// - `DepthExceeded` if the subtree is deeper than the configured limit
    pub fn department_descendants(
        &self,
        department_id: DepartmentId,
    ) -> Result<BTreeSet<DepartmentId>, OrgTreeError> {
        if !self.has_department(department_id) {
            return Err(OrgTreeError::DepartmentNotFound { department_id });
        }

        let visited = self.collect_subtree(department_id, &self.children, |id| {
            OrgTreeError::DepartmentCycle { department_id: id }
        })?;
        Ok(visited.into_iter().collect())
    }

    /// Every user whose reports-to chain ends at `user_id`, excluding
    /// `user_id` itself.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if `user_id` is not in the snapshot
    /// - `ReportingCycle` if the traversal returns to a visited user
    /// - `DepthExceeded` if the chain is deeper than the configured limit
    pub fn direct_and_indirect_reports(
        &self,
        user_id: UserId,
    ) -> Result<BTreeSet<UserId>, OrgTreeError> {
        if !self.has_user(user_id) {
            return Err(OrgTreeError::UserNotFound { user_id });
        }

        let mut visited = self.collect_subtree(user_id, &self.direct_reports, |id| {
            OrgTreeError::ReportingCycle { user_id: id }
        })?;
        visited.remove(&user_id);
        Ok(visited.into_iter().collect())
    }

    /// Breadth-first walk of `index` from `root`. A node reached twice means
    /// the parent links contain a cycle, since every node has one parent.
    fn collect_subtree<F>(
        &self,
        root: uuid::Uuid,
        index: &HashMap<uuid::Uuid, Vec<uuid::Uuid>>,
        cycle_error: F,
    ) -> Result<HashSet<uuid::Uuid>, OrgTreeError>
    where
        F: Fn(uuid::Uuid) -> OrgTreeError,
    {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([(root, 0usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            let Some(next_ids) = index.get(&current) else {
                continue;
            };

            for next in next_ids {
                if !visited.insert(*next) {
                    return Err(cycle_error(*next));
                }
                if depth + 1 > self.max_depth {
                    return Err(OrgTreeError::DepthExceeded {
                        root_id: root,
                        max_depth: self.max_depth,
                    });
                }
                queue.push_back((*next, depth + 1));
            }
        }

        Ok(visited)
    }

    /// Parent chain of a department, ordered from direct parent to root.
    ///
    /// Stops at a parent reference that is missing from the snapshot.
    ///
    /// # Errors
    ///
    /// - `DepartmentNotFound` if `department_id` is not in the snapshot
    /// - `DepartmentCycle` if the chain returns to a visited department
    pub fn department_ancestors(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentId>, OrgTreeError> {
        let department = self
            .department(department_id)
            .ok_or(OrgTreeError::DepartmentNotFound { department_id })?;

        let mut ancestors = Vec::new();
        let mut visited = HashSet::from([department_id]);
        let mut current_parent_id = department.parent_id;

        while let Some(parent_id) = current_parent_id {
            if !visited.insert(parent_id) {
                return Err(OrgTreeError::DepartmentCycle {
                    department_id: parent_id,
                });
            }
            let Some(parent) = self.department(parent_id) else {
                break;
            };
            ancestors.push(parent_id);
            current_parent_id = parent.parent_id;
        }

        Ok(ancestors)
    }

    /// Management chain of a user, ordered from direct manager upwards.
    ///
    /// Stops at a reports-to reference that is missing from the snapshot.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if `user_id` is not in the snapshot
    /// - `ReportingCycle` if the chain returns to a visited user
    pub fn management_chain(&self, user_id: UserId) -> Result<Vec<UserId>, OrgTreeError> {
        let user = self
            .user(user_id)
            .ok_or(OrgTreeError::UserNotFound { user_id })?;

        let mut chain = Vec::new();
        let mut visited = HashSet::from([user_id]);
        let mut current_manager_id = user.reports_to_id;

        while let Some(manager_id) = current_manager_id {
            if !visited.insert(manager_id) {
                return Err(OrgTreeError::ReportingCycle {
                    user_id: manager_id,
                });
            }
            let Some(manager) = self.user(manager_id) else {
                break;
            };
            chain.push(manager_id);
            current_manager_id = manager.reports_to_id;
        }

        Ok(chain)
    }

    /// Checks that re-parenting `department_id` under `parent_id` keeps the
    /// department invariants: same contract, no cycle.
    ///
    /// # Errors
    ///
    /// - `DepartmentNotFound` if either department is missing
    /// - `CrossContractParent` if the parent belongs to another contract
    /// - `DepartmentCycle` if the department would become its own ancestor
    pub fn check_department_parent(
        &self,
        department_id: DepartmentId,
        parent_id: Option<DepartmentId>,
    ) -> Result<(), OrgTreeError> {
        let department = self
            .department(department_id)
            .ok_or(OrgTreeError::DepartmentNotFound { department_id })?;

        let Some(parent_id) = parent_id else {
            return Ok(());
        };

        let parent = self
            .department(parent_id)
            .ok_or(OrgTreeError::DepartmentNotFound {
                department_id: parent_id,
            })?;

        if parent.contract_id != department.contract_id {
            return Err(OrgTreeError::CrossContractParent {
                department_id,
                parent_id,
            });
        }

        if parent_id == department_id
            || self.department_ancestors(parent_id)?.contains(&department_id)
        {
            return Err(OrgTreeError::DepartmentCycle { department_id });
        }

        Ok(())
    }

    /// Checks that pointing `user_id`'s reports-to link at `manager_id`
    /// keeps the reporting chain acyclic.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if either user is missing
    /// - `ReportingCycle` if the user would end up reporting to themselves
    pub fn check_reports_to(
        &self,
        user_id: UserId,
        manager_id: Option<UserId>,
    ) -> Result<(), OrgTreeError> {
        if !self.has_user(user_id) {
            return Err(OrgTreeError::UserNotFound { user_id });
        }

        let Some(manager_id) = manager_id else {
            return Ok(());
        };

        if !self.has_user(manager_id) {
            return Err(OrgTreeError::UserNotFound {
                user_id: manager_id,
            });
        }

        if manager_id == user_id || self.management_chain(manager_id)?.contains(&user_id) {
            return Err(OrgTreeError::ReportingCycle { user_id });
        }

        Ok(())
    }

    /// Scans the whole snapshot and lists every integrity problem: dangling
    /// references, cross-contract parents and members of cycles.
    ///
    /// Output is sorted by the ID of the row the problem was found on.
    #[must_use]
    pub fn integrity_issues(&self) -> Vec<OrgTreeError> {
        let mut issues = Vec::new();

        let mut departments: Vec<&DepartmentInfo> = self.departments.values().collect();
        departments.sort_unstable_by_key(|d| d.id);
        for department in departments {
            if let Some(parent_id) = department.parent_id {
                match self.department(parent_id) {
                    None => issues.push(OrgTreeError::DanglingReference {
                        owner_id: department.id,
                        field: "parent_id",
                        target_id: parent_id,
                    }),
                    Some(parent) if parent.contract_id != department.contract_id => {
                        issues.push(OrgTreeError::CrossContractParent {
                            department_id: department.id,
                            parent_id,
                        });
                    }
                    Some(_) => {}
                }
            }

            for manager_id in &department.manager_ids {
                if !self.has_user(*manager_id) {
                    issues.push(OrgTreeError::DanglingReference {
                        owner_id: department.id,
                        field: "manager_ids",
                        target_id: *manager_id,
                    });
                }
            }

            if self.department_on_cycle(department.id) {
                issues.push(OrgTreeError::DepartmentCycle {
                    department_id: department.id,
                });
            }
        }

        let mut users: Vec<&UserInfo> = self.users.values().collect();
        users.sort_unstable_by_key(|u| u.id);
        for user in users {
            if let Some(department_id) = user.department_id
                && !self.has_department(department_id)
            {
                issues.push(OrgTreeError::DanglingReference {
                    owner_id: user.id,
                    field: "department_id",
                    target_id: department_id,
                });
            }

            if let Some(manager_id) = user.reports_to_id
                && !self.has_user(manager_id)
            {
                issues.push(OrgTreeError::DanglingReference {
                    owner_id: user.id,
                    field: "reports_to_id",
                    target_id: manager_id,
                });
            }

            if self.user_on_cycle(user.id) {
                issues.push(OrgTreeError::ReportingCycle { user_id: user.id });
            }
        }

        issues
    }

    fn department_on_cycle(&self, department_id: DepartmentId) -> bool {
        matches!(
            self.department_ancestors(department_id),
            Err(OrgTreeError::DepartmentCycle { department_id: at }) if at == department_id
        )
    }

    fn user_on_cycle(&self, user_id: UserId) -> bool {
        matches!(
            self.management_chain(user_id),
            Err(OrgTreeError::ReportingCycle { user_id: at }) if at == user_id
        )
    }
}
