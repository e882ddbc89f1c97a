use sea_orm::entity::prelude::*;

/// The rating a user gave to a professor for a module instance.
///
/// A user holds at most one rating per (professor, module instance) pair: the
/// schema carries a unique index over the (user, professor, module instance)
/// triple, and submitting again updates the existing row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    /// The rating ID.
    #[sea_orm(primary_key)]
    pub id: u32,
    /// The ID of the user who rates.
    pub user_id: u32,
    /// The ID of the rated professor.
    pub professor_id: String,
    /// The ID of the module instance the professor is rated for.
    pub module_instance_id: u32,
    /// The score, between 1 and 5.
    pub score: u8,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::ProfessorId",
        to = "super::professors::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Professors,
    #[sea_orm(
        belongs_to = "super::module_instances::Entity",
        from = "Column::ModuleInstanceId",
        to = "super::module_instances::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    ModuleInstances,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professors.def()
    }
}

impl Related<super::module_instances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModuleInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
