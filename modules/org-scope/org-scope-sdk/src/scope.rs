//! Resolved visibility scope.
//!
//! A [`Scope`] restricts three dimensions: contracts, departments and owning
//! users. All three are `ANDed` when a resource is checked. A dimension is
//! either [`ScopeDimension::All`] (no restriction within the already-restricted
//! contracts) or an explicit set of IDs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::filter::{ScopeFilter, ScopePredicate, ScopeProperty};
use crate::models::{ContractId, DepartmentId, UserId};

/// One dimension of a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ids", rename_all = "snake_case")]
pub enum ScopeDimension {
    /// No restriction along this dimension.
    All,
    /// Only the listed IDs. An empty set matches nothing.
    Only(BTreeSet<Uuid>),
}

impl ScopeDimension {
    /// A dimension that matches nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    #[must_use]
    pub fn one(id: Uuid) -> Self {
        Self::Only(BTreeSet::from([id]))
    }

    #[must_use]
    pub fn only<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        Self::Only(ids.into_iter().collect())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns true if this dimension matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(ids) if ids.is_empty())
    }

    #[must_use]
    pub fn contains(&self, id: &Uuid) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(id),
        }
    }

    /// The explicit ID set, or `None` for [`ScopeDimension::All`].
    #[must_use]
    pub fn ids(&self) -> Option<&BTreeSet<Uuid>> {
        match self {
            Self::All => None,
            Self::Only(ids) => Some(ids),
        }
    }
}

/// The visibility set of an acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub contract_ids: ScopeDimension,
    pub department_ids: ScopeDimension,
    pub user_ids: ScopeDimension,
}

impl Scope {
    /// Scope with no restriction on any dimension.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            contract_ids: ScopeDimension::All,
            department_ids: ScopeDimension::All,
            user_ids: ScopeDimension::All,
        }
    }

    /// Scope that matches no resource at all.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            contract_ids: ScopeDimension::none(),
            department_ids: ScopeDimension::none(),
            user_ids: ScopeDimension::none(),
        }
    }

    /// Every department and user inside the given contracts.
    #[must_use]
    pub fn contracts<I>(contract_ids: I) -> Self
    where
        I: IntoIterator<Item = ContractId>,
    {
        Self {
            contract_ids: ScopeDimension::only(contract_ids),
            department_ids: ScopeDimension::All,
            user_ids: ScopeDimension::All,
        }
    }

    /// Own contract, own recorded department (if any), own rows.
    #[must_use]
    pub fn self_only(
        user_id: UserId,
        contract_id: ContractId,
        department_id: Option<DepartmentId>,
    ) -> Self {
        Self {
            contract_ids: ScopeDimension::one(contract_id),
            department_ids: ScopeDimension::only(department_id),
            user_ids: ScopeDimension::one(user_id),
        }
    }

    /// Returns true if no resource can be visible under this scope.
    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        self.contract_ids.is_empty() || self.user_ids.is_empty()
    }

    /// Checks a single resource against this scope.
    ///
    /// A resource without a department is checked on the contract and user
    /// dimensions only. A resource without an owner is visible only when the
    /// user dimension is unrestricted.
    #[must_use]
    pub fn is_visible(&self, resource: &ResourceRef) -> bool {
        if !self.contract_ids.contains(&resource.contract_id) {
            return false;
        }

        if let Some(department_id) = resource.department_id
            && !self.department_ids.contains(&department_id)
        {
            return false;
        }

        match (&self.user_ids, resource.owner_id) {
            (ScopeDimension::All, _) => true,
            (ScopeDimension::Only(ids), Some(owner_id)) => ids.contains(&owner_id),
            (ScopeDimension::Only(_), None) => false,
        }
    }

    /// Builds the storage-agnostic filter for set-level list queries.
    ///
    /// The filter accepts exactly the resources [`Scope::is_visible`] accepts.
    #[must_use]
    pub fn filter(&self) -> ScopeFilter {
        if self.is_deny_all() {
            return ScopeFilter::DenyAll;
        }

        let mut predicates = Vec::new();

        if let ScopeDimension::Only(ids) = &self.contract_ids {
            predicates.push(ScopePredicate {
                property: ScopeProperty::ContractId,
                values: ids.clone(),
                matches_null: false,
            });
        }

        if let ScopeDimension::Only(ids) = &self.department_ids {
            predicates.push(ScopePredicate {
                property: ScopeProperty::DepartmentId,
                values: ids.clone(),
                matches_null: true,
            });
        }

        if let ScopeDimension::Only(ids) = &self.user_ids {
            predicates.push(ScopePredicate {
                property: ScopeProperty::OwnerId,
                values: ids.clone(),
                matches_null: false,
            });
        }

        ScopeFilter::Match(predicates)
    }
}

/// The scoping attributes of a resource row (visa application, todo,
/// beneficiary, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub contract_id: ContractId,
    /// `None` for contract-level resources.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub owner_id: Option<UserId>,
}

impl ResourceRef {
    #[must_use]
    pub fn new(
        contract_id: ContractId,
        department_id: Option<DepartmentId>,
        owner_id: Option<UserId>,
    ) -> Self {
        Self {
            contract_id,
            department_id,
            owner_id,
        }
    }
}
