use org_scope_sdk::ScopeProperty;
use sea_orm::EntityTrait;

/// Declares which columns of an entity carry the scope attributes.
///
/// Every dimension must be stated explicitly as `Some(Column::...)` or
/// `None`; there are no defaults.
///
/// ```rust,ignore
/// impl ScopableEntity for todo::Entity {
///     fn contract_col() -> Option<Self::Column> {
///         Some(todo::Column::ContractId)
///     }
///     // Contract-level rows, no department column.
///     fn department_col() -> Option<Self::Column> {
///         None
///     }
///     fn owner_col() -> Option<Self::Column> {
///         Some(todo::Column::AssigneeId)
///     }
/// }
/// ```
pub trait ScopableEntity: EntityTrait {
    /// Column that stores the contract identifier.
    fn contract_col() -> Option<Self::Column>;

    /// Column that stores the department identifier (nullable).
    fn department_col() -> Option<Self::Column>;

    /// Column that stores the owning user identifier (nullable).
    fn owner_col() -> Option<Self::Column>;

    /// Column for a scope property, if the entity stores it.
    #[must_use]
    fn column_for(property: ScopeProperty) -> Option<Self::Column> {
        match property {
            ScopeProperty::ContractId => Self::contract_col(),
            ScopeProperty::DepartmentId => Self::department_col(),
            ScopeProperty::OwnerId => Self::owner_col(),
        }
    }
}
