use sea_orm::entity::prelude::*;

/// The association between module instances and the professors teaching them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "module_instance_professors")]
pub struct Model {
    /// The ID of the module instance.
    #[sea_orm(primary_key, auto_increment = false)]
    pub module_instance_id: u32,
    /// The ID of the professor.
    #[sea_orm(primary_key, auto_increment = false)]
    pub professor_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::module_instances::Entity",
        from = "Column::ModuleInstanceId",
        to = "super::module_instances::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    ModuleInstances,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Professors,
}

impl Related<super::module_instances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleInstances.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
