//! This module contains anything related to the users of the service in this library.

use entity::users;
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _,
};

use crate::error::{RatingsError, RatingsResult};

/// Returns the optional user from the provided login.
pub async fn get_user_from_login<C: ConnectionTrait>(
    conn: &C,
    login: &str,
) -> RatingsResult<Option<users::Model>> {
    let user = users::Entity::find()
        .filter(users::Column::Login.eq(login))
        .one(conn)
        .await?;
    Ok(user)
}

/// Creates a new user with the provided login, email, and password hash.
///
/// The login must not be taken by another user.
pub async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    login: &str,
    email: &str,
    password_hash: &str,
) -> RatingsResult<users::Model> {
    let user = users::ActiveModel {
        login: Set(login.to_owned()),
        email: Set(email.to_owned()),
        password_hash: Set(password_hash.to_owned()),
        join_date: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    users::Entity::insert(user)
        .exec(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                RatingsError::UsernameAlreadyExists(login.to_owned())
            }
            _ => e.into(),
        })?;

    let user = get_user_from_login(conn, login)
        .await?
        .unwrap_or_else(|| panic!("user `{login}` should exist after insertion"));
    Ok(user)
}
