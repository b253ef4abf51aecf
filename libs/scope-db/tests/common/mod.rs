#![allow(dead_code)]

//! Test entities shared by the scope-db integration tests.

pub mod visa_application {
    use sea_orm::entity::prelude::*;
    use scope_db::ScopableEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "visa_applications")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub contract_id: Uuid,
        pub department_id: Option<Uuid>,
        pub beneficiary_id: Option<Uuid>,
        pub visa_type: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl ScopableEntity for Entity {
        fn contract_col() -> Option<Self::Column> {
            Some(Column::ContractId)
        }
        fn department_col() -> Option<Self::Column> {
            Some(Column::DepartmentId)
        }
        fn owner_col() -> Option<Self::Column> {
            Some(Column::BeneficiaryId)
        }
    }
}

/// Contract-level rows with neither department nor owner.
pub mod contract_note {
    use sea_orm::entity::prelude::*;
    use scope_db::ScopableEntity;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "contract_notes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub contract_id: Uuid,
        pub body: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl ScopableEntity for Entity {
        fn contract_col() -> Option<Self::Column> {
            Some(Column::ContractId)
        }
        fn department_col() -> Option<Self::Column> {
            None
        }
        fn owner_col() -> Option<Self::Column> {
            None
        }
    }
}
