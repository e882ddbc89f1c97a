//! This module contains utility functions used to retrieve some objects from the database,
//! that must exist. This is why it is called `must`.
//!
//! This module is used when a route is called at a point where something must be already registered
//! in the database, like a user, a professor, a module, etc.
//!
//! Unlike the Rust conventions, when such an object doesn't exist, the returned value isn't
//! `Option::None` but the corresponding error (for example, `RatingsError::ProfessorNotFound`).
//! This makes the code cleaner thanks to the [`Try`](std::ops::Try) trait syntax, because at some point
//! we most likely want things to be already existing, without checking it repeatedly
//! and returning the error to the client.

use sea_orm::ConnectionTrait;

use crate::{
    error::{RatingsError, RatingsResult},
    module, professor, user,
};

/// Returns the user in the database bound to the provided login.
pub async fn have_user<C: ConnectionTrait>(
    conn: &C,
    login: &str,
) -> RatingsResult<entity::users::Model> {
    user::get_user_from_login(conn, login)
        .await?
        .ok_or_else(|| RatingsError::UserNotFound(login.to_owned()))
}

/// Returns the professor in the database bound to the provided ID.
pub async fn have_professor<C: ConnectionTrait>(
    conn: &C,
    professor_id: &str,
) -> RatingsResult<entity::professors::Model> {
    professor::get_professor_from_id(conn, professor_id)
        .await?
        .ok_or_else(|| RatingsError::ProfessorNotFound(professor_id.to_owned()))
}

/// Returns the module in the database bound to the provided code.
pub async fn have_module<C: ConnectionTrait>(
    conn: &C,
    module_code: &str,
) -> RatingsResult<entity::modules::Model> {
    module::get_module_from_code(conn, module_code)
        .await?
        .ok_or_else(|| RatingsError::ModuleNotFound(module_code.to_owned()))
}

/// Returns the instance of the provided module for the provided year and semester.
pub async fn have_module_instance<C: ConnectionTrait>(
    conn: &C,
    module_code: &str,
    year: i32,
    semester: u8,
) -> RatingsResult<entity::module_instances::Model> {
    module::get_instance(conn, module_code, year, semester)
        .await?
        .ok_or_else(|| RatingsError::ModuleInstanceNotFound(module_code.to_owned(), year, semester))
}
