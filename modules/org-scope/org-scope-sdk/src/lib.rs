//! Org Scope SDK
//!
//! This crate provides the public API for the `org-scope` module:
//!
//! - [`OrgScopeClient`] - Scope resolution API for CRUD endpoints
//! - [`OrgDirectoryClient`] - Read API implemented by organization data sources
//! - [`Scope`], [`ScopeDimension`], [`ResourceRef`] - Resolved visibility
//! - [`ScopeFilter`] - Set-level filter for list queries
//! - [`UserInfo`], [`DepartmentInfo`], [`Role`] - Directory models
//! - [`OrgScopeError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use org_scope_sdk::{OrgScopeClient, ResourceRef};
//!
//! let scope = client.resolve_scope(user_id).await?;
//! let visible = scope.is_visible(&ResourceRef::new(contract_id, Some(department_id), Some(owner_id)));
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod directory_api;
pub mod error;
pub mod filter;
pub mod models;
pub mod scope;

pub use api::OrgScopeClient;
pub use directory_api::OrgDirectoryClient;
pub use error::OrgScopeError;
pub use filter::{ScopeFilter, ScopePredicate, ScopeProperty};
pub use models::{ContractId, DepartmentId, DepartmentInfo, Role, UserId, UserInfo};
pub use scope::{ResourceRef, Scope, ScopeDimension};
