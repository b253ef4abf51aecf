//! Storage-agnostic scope filter.
//!
//! A [`ScopeFilter`] is what a storage layer applies at set level for list
//! queries instead of fetching rows and calling [`crate::Scope::is_visible`]
//! one by one. All predicates are `ANDed`; an empty predicate list means no
//! restriction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scope::ResourceRef;

/// Resource property a predicate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeProperty {
    ContractId,
    DepartmentId,
    OwnerId,
}

impl ScopeProperty {
    /// Conventional column name for the property.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContractId => "contract_id",
            Self::DepartmentId => "department_id",
            Self::OwnerId => "owner_id",
        }
    }
}

/// Set membership predicate: `property IN (values)`, optionally also
/// accepting rows where the property is null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePredicate {
    pub property: ScopeProperty,
    pub values: BTreeSet<Uuid>,
    /// Rows with no value for the property pass this predicate.
    pub matches_null: bool,
}

impl ScopePredicate {
    #[must_use]
    pub fn matches(&self, value: Option<Uuid>) -> bool {
        match value {
            Some(v) => self.values.contains(&v),
            None => self.matches_null,
        }
    }
}

/// Filter compiled from a [`crate::Scope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "predicates", rename_all = "snake_case")]
pub enum ScopeFilter {
    /// No row matches.
    DenyAll,
    /// A row matches if it satisfies every predicate.
    Match(Vec<ScopePredicate>),
}

impl ScopeFilter {
    #[must_use]
    pub fn matches(&self, resource: &ResourceRef) -> bool {
        match self {
            Self::DenyAll => false,
            Self::Match(predicates) => predicates.iter().all(|p| {
                let value = match p.property {
                    ScopeProperty::ContractId => Some(resource.contract_id),
                    ScopeProperty::DepartmentId => resource.department_id,
                    ScopeProperty::OwnerId => resource.owner_id,
                };
                p.matches(value)
            }),
        }
    }

    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::DenyAll)
    }
}
