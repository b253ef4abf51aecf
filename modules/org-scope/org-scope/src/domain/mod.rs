//! Domain layer for the org scope module.

pub mod error;
pub mod local_client;
pub mod org_tree;
pub mod resolver;
pub mod service;

pub use error::{DomainError, OrgTreeError};
pub use local_client::OrgScopeLocalClient;
pub use org_tree::OrgTree;
pub use resolver::{Fallback, Resolution, resolve, resolve_with_diagnostics};
pub use service::Service;
