use std::marker::PhantomData;

use org_scope_sdk::Scope;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, Statement,
};

use crate::cond::build_scope_condition;
use crate::entity_traits::ScopableEntity;
use crate::error::ScopeError;

/// Typestate marker: query has not yet been scoped.
/// Cannot execute queries in this state.
#[derive(Debug, Clone, Copy)]
pub struct Unscoped;

/// Typestate marker: query has been scoped with the acting user's scope.
#[derive(Debug, Clone, Copy)]
pub struct Scoped;

/// A wrapper around sea-orm's `Select` that cannot run until a [`Scope`]
/// has been applied via [`SecureSelect::scope_with`].
#[must_use]
#[derive(Clone, Debug)]
pub struct SecureSelect<E: EntityTrait, S> {
    inner: sea_orm::Select<E>,
    _state: PhantomData<S>,
}

/// Extension trait to convert a regular sea-orm `Select` into a
/// [`SecureSelect`].
pub trait ScopedSelectExt<E: EntityTrait>: Sized {
    /// Convert this select query into an unscoped secure select.
    fn secure(self) -> SecureSelect<E, Unscoped>;
}

impl<E> ScopedSelectExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureSelect<E, Unscoped> {
        SecureSelect {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> SecureSelect<E, Unscoped>
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    /// Apply the scope, transitioning to the `Scoped` state.
    pub fn scope_with(self, scope: &Scope) -> SecureSelect<E, Scoped> {
        SecureSelect {
            inner: self.inner.filter(build_scope_condition::<E>(scope)),
            _state: PhantomData,
        }
    }
}

impl<E> SecureSelect<E, Scoped>
where
    E: EntityTrait,
{
    /// Execute the query and return all matching rows.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.inner.all(conn).await?)
    }

    /// Execute the query and return at most one row.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn one<C>(self, conn: &C) -> Result<Option<E::Model>, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.inner.one(conn).await?)
    }

    /// Execute the query and return the number of matching rows.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        Ok(self.inner.count(conn).await?)
    }

    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }

    /// Skip `offset` visible rows and return at most `limit` of the rest.
    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.inner = QuerySelect::limit(QuerySelect::offset(self.inner, offset), limit);
        self
    }

    /// Apply the same scope to a joined entity.
    ///
    /// ```ignore
    /// // Todos joined to their visa application; both must be visible.
    /// todo::Entity::find()
    ///     .join(JoinType::InnerJoin, todo::Relation::VisaApplication.def())
    ///     .secure()
    ///     .scope_with(&scope)
    ///     .and_scope_for::<visa_application::Entity>(&scope)
    ///     .all(conn)
    ///     .await?
    /// ```
    pub fn and_scope_for<J>(mut self, scope: &Scope) -> Self
    where
        J: ScopableEntity,
        J::Column: ColumnTrait + Copy,
    {
        self.inner = QueryFilter::filter(self.inner, build_scope_condition::<J>(scope));
        self
    }

    /// Render the scoped query for `backend`, scope conditions included.
    #[must_use]
    pub fn statement(&self, backend: DbBackend) -> Statement {
        self.inner.build(backend)
    }
}
