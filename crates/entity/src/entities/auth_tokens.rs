use sea_orm::entity::prelude::*;

/// The current authentication token of a user.
///
/// A user holds at most one token. Logging in again replaces the stored row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    /// The ID of the user the token belongs to.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: u32,
    /// The sha256 digest of the issued token.
    #[sea_orm(unique)]
    pub token_hash: String,
    /// When the token was issued.
    pub created_at: DateTime,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
