use sea_orm::entity::prelude::*;

/// An offering of a module in a given year and semester.
///
/// The (module, year, semester) triple is unique: the schema carries a unique
/// index over these columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "module_instances")]
pub struct Model {
    /// The instance ID.
    #[sea_orm(primary_key)]
    pub id: u32,
    /// The code of the offered module.
    pub module_code: String,
    /// The year of the offering.
    pub year: i32,
    /// The semester of the offering.
    pub semester: u8,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleCode",
        to = "super::modules::Column::Code",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Modules,
    #[sea_orm(has_many = "super::module_instance_professors::Entity")]
    ModuleInstanceProfessors,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modules.def()
    }
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

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        super::module_instance_professors::Relation::Professors.def()
    }
    fn via() -> Option<RelationDef> {
        Some(
            super::module_instance_professors::Relation::ModuleInstances
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
