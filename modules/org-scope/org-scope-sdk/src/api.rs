//! Public API trait for the scope resolver.

use async_trait::async_trait;

use crate::error::OrgScopeError;
use crate::models::UserId;
use crate::scope::{ResourceRef, Scope};

/// Public API trait for the scope resolver.
///
/// CRUD endpoints resolve the acting user's scope once per request and
/// apply it to every list or fetch they perform:
///
/// ```ignore
/// let scope = resolver.resolve_scope(acting_user_id).await?;
///
/// // Single row
/// if !scope.is_visible(&ResourceRef::new(app.contract_id, app.department_id, Some(app.owner_id))) {
///     return Err(NotFound);
/// }
///
/// // List query
/// let rows = visa_application::Entity::find()
///     .secure()
///     .scope_with(&scope)
///     .all(conn)
///     .await?;
/// ```
#[async_trait]
pub trait OrgScopeClient: Send + Sync {
    /// Resolve the visibility scope of the acting user.
    ///
    /// Unknown or inactive users resolve to [`Scope::deny_all`].
    ///
    /// # Errors
    ///
    /// - `DirectoryUnavailable` if the organization directory cannot be read
    async fn resolve_scope(&self, user_id: UserId) -> Result<Scope, OrgScopeError>;

    /// Resolve the acting user's scope and check a single resource against it.
    ///
    /// # Errors
    ///
    /// - `DirectoryUnavailable` if the organization directory cannot be read
    async fn is_visible(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
    ) -> Result<bool, OrgScopeError>;
}
