//! Org Scope Module
//!
//! Resolves, per request, which contracts, departments and users an acting
//! user may see. The module reads an organization snapshot through
//! [`org_scope_sdk::OrgDirectoryClient`], traverses the department tree and
//! the reporting chain, and applies the role rules.
//!
//! The module provides the [`org_scope_sdk::OrgScopeClient`] implementation
//! [`domain::OrgScopeLocalClient`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::OrgScopeConfig;
pub use domain::{
    Fallback, OrgScopeLocalClient, OrgTree, OrgTreeError, Resolution, Service, resolve,
    resolve_with_diagnostics,
};
