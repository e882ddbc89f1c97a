use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use ratings_lib::cache::RedisCache;
use ratings_lib::{Database, rating};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::auth::AuthGuard;
use crate::utils::json;
use crate::{FitRequestId as _, RatingsResponse, Res};

pub fn rating_scope() -> Scope {
    web::scope("/ratings")
        .route("", web::get().to(ratings_list))
        .route("", web::post().to(rate))
}

/// A rating of the caller, with the coordinates of the rated module instance.
#[derive(Serialize)]
struct RatingResponse {
    id: u32,
    user: String,
    professor: String,
    module_code: String,
    year: i32,
    semester: u8,
    rating: u8,
}

#[derive(Deserialize)]
pub struct RateBody {
    professor: String,
    module_code: String,
    year: i32,
    semester: u8,
    rating: u8,
}

async fn rate(
    guard: AuthGuard,
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<RateBody>,
) -> RatingsResponse<impl Responder> {
    let invalidator = RedisCache::new(db.redis_pool.clone());

    // The rating owner is always the authenticated caller, whatever the body says.
    let rating = rating::submit(
        &db.sql_conn,
        &invalidator,
        guard.user_id,
        rating::SubmitRatingParams {
            professor_id: &body.professor,
            module_code: &body.module_code,
            year: body.year,
            semester: body.semester,
            score: body.rating,
        },
    )
    .await
    .fit(req_id)?;

    json(RatingResponse {
        id: rating.id,
        user: guard.login,
        professor: rating.professor_id,
        module_code: body.module_code,
        year: body.year,
        semester: body.semester,
        rating: rating.score,
    })
}

async fn ratings_list(
    guard: AuthGuard,
    req_id: RequestId,
    db: Res<Database>,
) -> RatingsResponse<impl Responder> {
    let ratings = rating::get_ratings_of_user(&db.sql_conn, guard.user_id)
        .await
        .fit(req_id)?;

    let mut items = Vec::with_capacity(ratings.len());
    for (rating, instance) in ratings {
        let instance = instance.unwrap_or_else(|| {
            panic!(
                "rating {} should reference an existing module instance",
                rating.id
            )
        });

        items.push(RatingResponse {
            id: rating.id,
            user: guard.login.clone(),
            professor: rating.professor_id,
            module_code: instance.module_code,
            year: instance.year,
            semester: instance.semester,
            rating: rating.score,
        });
    }

    json(items)
}
