use sea_orm::entity::prelude::*;

/// A professor in the database.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    /// The professor ID, a short stable identifier like `JE1`.
    ///
    /// This is an external key, not a generated one.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The display name of the professor.
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::module_instance_professors::Entity")]
    ModuleInstanceProfessors,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::module_instance_professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleInstanceProfessors.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::module_instances::Entity> for Entity {
    fn to() -> RelationDef {
        super::module_instance_professors::Relation::ModuleInstances.def()
    }
    fn via() -> Option<RelationDef> {
        Some(
            super::module_instance_professors::Relation::Professors
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
