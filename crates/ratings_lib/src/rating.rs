//! This module contains anything related to ratings in this library,
//! in particular the rating submission.

use entity::{module_instances, ratings};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _,
    QueryOrder as _,
};

use crate::cache::{self, CacheInvalidator};
use crate::error::{RatingsError, RatingsResult};
use crate::must;

/// The parameters of a rating submission.
#[derive(Debug, Clone)]
pub struct SubmitRatingParams<'a> {
    /// The ID of the rated professor.
    pub professor_id: &'a str,
    /// The code of the module.
    pub module_code: &'a str,
    /// The year of the module instance.
    pub year: i32,
    /// The semester of the module instance.
    pub semester: u8,
    /// The score, between 1 and 5.
    pub score: u8,
}

/// Submits the rating of a user for a professor in a module instance.
///
/// If the user already rated this professor for this instance, the existing
/// row is updated in place and keeps its ID. Otherwise, a new rating is
/// created. The unique index on the (user, professor, module instance) triple
/// makes the write a single conflict-handling statement, so two concurrent
/// submissions end up as a single row.
///
/// On success, the cached responses bound to the professor, the module, and
/// the global listings are purged through the provided invalidator. A failed
/// invalidation leaves the cache stale but doesn't fail the submission.
pub async fn submit<C, I>(
    conn: &C,
    invalidator: &I,
    user_id: u32,
    params: SubmitRatingParams<'_>,
) -> RatingsResult<ratings::Model>
where
    C: ConnectionTrait,
    I: CacheInvalidator,
{
    if !(1..=5).contains(&params.score) {
        return Err(RatingsError::InvalidScore(params.score));
    }

    let professor = must::have_professor(conn, params.professor_id).await?;
    let module = must::have_module(conn, params.module_code).await?;
    let instance =
        must::have_module_instance(conn, &module.code, params.year, params.semester).await?;

    let rating = ratings::ActiveModel {
        user_id: Set(user_id),
        professor_id: Set(professor.id.clone()),
        module_instance_id: Set(instance.id),
        score: Set(params.score),
        ..Default::default()
    };

    ratings::Entity::insert(rating)
        .on_conflict(
            OnConflict::columns([
                ratings::Column::UserId,
                ratings::Column::ProfessorId,
                ratings::Column::ModuleInstanceId,
            ])
            .update_column(ratings::Column::Score)
            .to_owned(),
        )
        .exec(conn)
        .await?;

    let rating = ratings::Entity::find()
        .filter(ratings::Column::UserId.eq(user_id))
        .filter(ratings::Column::ProfessorId.eq(professor.id.as_str()))
        .filter(ratings::Column::ModuleInstanceId.eq(instance.id))
        .one(conn)
        .await?
        .unwrap_or_else(|| {
            panic!(
                "rating of user {user_id} for professor `{}` in instance {} should exist after submission",
                professor.id, instance.id
            )
        });

    if let Err(e) = invalidator
        .invalidate(cache::affected_keys(&professor.id, &module.code))
        .await
    {
        tracing::warn!("failed to invalidate cached responses after rating submission: {e}");
    }

    Ok(rating)
}

/// Returns the ratings of the provided user with their module instance, ordered by ID.
///
/// Ratings are owner-scoped: this is the only listing the service exposes,
/// and it never returns the rows of another user.
pub async fn get_ratings_of_user<C: ConnectionTrait>(
    conn: &C,
    user_id: u32,
) -> RatingsResult<Vec<(ratings::Model, Option<module_instances::Model>)>> {
    let ratings = ratings::Entity::find()
        .filter(ratings::Column::UserId.eq(user_id))
        .find_also_related(module_instances::Entity)
        .order_by_asc(ratings::Column::Id)
        .all(conn)
        .await?;
    Ok(ratings)
}
