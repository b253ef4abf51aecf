//! Local (in-process) client for the org scope module.

use std::sync::Arc;

use async_trait::async_trait;
use org_scope_sdk::{OrgScopeClient, OrgScopeError, ResourceRef, Scope, UserId};

use super::{DomainError, Service};

/// Local client wrapping the org scope service.
pub struct OrgScopeLocalClient {
    svc: Arc<Service>,
}

impl OrgScopeLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> OrgScopeError {
    tracing::error!(operation = op, error = ?e, "org-scope call failed");
    e.into()
}

#[async_trait]
impl OrgScopeClient for OrgScopeLocalClient {
    async fn resolve_scope(&self, user_id: UserId) -> Result<Scope, OrgScopeError> {
        self.svc
            .resolve_scope(user_id)
            .await
            .map_err(|e| log_and_convert("resolve_scope", e))
    }

    async fn is_visible(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
    ) -> Result<bool, OrgScopeError> {
        self.svc
            .is_visible(user_id, resource)
            .await
            .map_err(|e| log_and_convert("is_visible", e))
    }
}
