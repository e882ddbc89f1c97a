use sea_orm::entity::prelude::*;

/// A module (a course) in the database.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    /// The module code, like `CD1`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    /// The display name of the module.
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::module_instances::Entity")]
    ModuleInstances,
}

impl Related<super::module_instances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
