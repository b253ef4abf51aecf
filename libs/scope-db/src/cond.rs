use org_scope_sdk::{Scope, ScopeFilter, ScopePredicate};
use sea_orm::{ColumnTrait, Condition, EntityTrait, sea_query::Expr};

use crate::entity_traits::ScopableEntity;

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Builds a sea-orm `Condition` accepting exactly the rows the scope makes
/// visible.
#[must_use]
pub fn build_scope_condition<E>(scope: &Scope) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    build_filter_condition::<E>(&scope.filter())
}

/// Compiles a storage-agnostic [`ScopeFilter`] for entity `E`.
///
/// An empty predicate list yields an empty `Condition::all()`, which adds no
/// `WHERE` clause.
#[must_use]
pub fn build_filter_condition<E>(filter: &ScopeFilter) -> Condition
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    let predicates = match filter {
        ScopeFilter::DenyAll => return deny_all(),
        ScopeFilter::Match(predicates) => predicates,
    };

    let mut cond = Condition::all();
    for predicate in predicates {
        match predicate_condition::<E>(predicate) {
            PredicateCond::Skip => {}
            PredicateCond::Deny => return deny_all(),
            PredicateCond::Cond(c) => cond = cond.add(c),
        }
    }
    cond
}

enum PredicateCond {
    Skip,
    Deny,
    Cond(Condition),
}

fn predicate_condition<E>(predicate: &ScopePredicate) -> PredicateCond
where
    E: ScopableEntity,
    E::Column: ColumnTrait + Copy,
{
    // A missing column reads as NULL on every row.
    let Some(col) = E::column_for(predicate.property) else {
        return if predicate.matches_null {
            PredicateCond::Skip
        } else {
            PredicateCond::Deny
        };
    };

    let column = || Expr::col((E::default(), col));
    let values: Vec<uuid::Uuid> = predicate.values.iter().copied().collect();

    let cond = match (values.is_empty(), predicate.matches_null) {
        (true, false) => return PredicateCond::Deny,
        (true, true) => Condition::all().add(column().is_null()),
        (false, false) => Condition::all().add(column().is_in(values)),
        (false, true) => Condition::any()
            .add(column().is_null())
            .add(column().is_in(values)),
    };
    PredicateCond::Cond(cond)
}
