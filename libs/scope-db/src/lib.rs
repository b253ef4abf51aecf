//! Scope DB - sea-orm query filter adapter
//!
//! Applies a resolved [`org_scope_sdk::Scope`] to sea-orm list queries at
//! set level, so a handler never fetches rows it would have to drop.
//!
//! # Example
//!
//! ```rust,ignore
//! use scope_db::{ScopableEntity, ScopedSelectExt};
//!
//! impl ScopableEntity for visa_application::Entity {
//!     fn contract_col() -> Option<Self::Column> {
//!         Some(visa_application::Column::ContractId)
//!     }
//!     fn department_col() -> Option<Self::Column> {
//!         Some(visa_application::Column::DepartmentId)
//!     }
//!     fn owner_col() -> Option<Self::Column> {
//!         Some(visa_application::Column::BeneficiaryUserId)
//!     }
//! }
//!
//! let scope = org_scope.resolve_scope(acting_user_id).await?;
//! let rows = visa_application::Entity::find()
//!     .secure()
//!     .scope_with(&scope)
//!     .order_by(visa_application::Column::CreatedAt, Order::Desc)
//!     .all(&conn)
//!     .await?;
//! ```
//!
//! # Policy
//!
//! | Scope | Behavior |
//! |-------|----------|
//! | Deny-all | `WHERE FALSE` |
//! | Contract set | `contract_col IN (...)` |
//! | Department set | `department_col IS NULL OR department_col IN (...)` |
//! | User set | `owner_col IN (...)` |
//!
//! A restricted dimension whose column the entity lacks behaves as if every
//! row stored `NULL` there: the department predicate is dropped, the
//! contract and owner predicates deny all.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cond;
mod entity_traits;
mod error;
mod select;

pub use cond::{build_filter_condition, build_scope_condition};
pub use entity_traits::ScopableEntity;
pub use error::ScopeError;
pub use select::{Scoped, ScopedSelectExt, SecureSelect, Unscoped};
