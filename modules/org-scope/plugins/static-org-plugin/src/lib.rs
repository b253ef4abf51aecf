//! Static Org Directory Plugin
//!
//! This plugin provides departments and users from configuration.
//! Useful for testing, development, and the `scope-inspect` tool.
//!
//! ## Configuration
//!
//! ```yaml
//! directory:
//!   departments:
//!     - id: "d1000000-0000-0000-0000-000000000001"
//!       contract_id: "c1000000-0000-0000-0000-000000000001"
//!       manager_ids: ["a1000000-0000-0000-0000-000000000001"]
//!     - id: "d1100000-0000-0000-0000-000000000002"
//!       contract_id: "c1000000-0000-0000-0000-000000000001"
//!       parent_id: "d1000000-0000-0000-0000-000000000001"
//!   users:
//!     - id: "a1000000-0000-0000-0000-000000000001"
//!       contract_id: "c1000000-0000-0000-0000-000000000001"
//!       department_id: "d1000000-0000-0000-0000-000000000001"
//!       role: TECH_LEAD
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{DepartmentConfig, StaticOrgPluginConfig, UserConfig};
pub use domain::Service;
