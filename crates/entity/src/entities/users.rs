use sea_orm::entity::prelude::*;

/// A registered user of the rating service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// The user ID.
    #[sea_orm(primary_key)]
    pub id: u32,
    /// The login of the user.
    #[sea_orm(unique)]
    pub login: String,
    /// The email address of the user.
    pub email: String,
    /// The sha256 digest of the user password.
    pub password_hash: String,
    /// When the user registered.
    pub join_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::auth_tokens::Entity")]
    AuthTokens,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::auth_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthTokens.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
