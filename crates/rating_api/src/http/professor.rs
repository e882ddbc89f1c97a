use actix_web::{
    HttpResponse, Responder, Scope,
    web::{self, Json, Path},
};
use ratings_lib::cache::{RedisCache, module_key, professor_key, professors_list_key};
use ratings_lib::{Database, must, professor};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::utils::json;
use crate::{FitRequestId as _, RatingsErrorKind, RatingsResponse, Res, cached};

pub fn professor_scope() -> Scope {
    web::scope("/professors")
        .route("", web::get().to(professors_list))
        .route("", web::post().to(professor_create))
        .route("/{professor_id}", web::get().to(professor_detail))
        .route(
            "/{professor_id}/modules/{module_code}/average",
            web::get().to(module_average),
        )
}

/// A professor with its rounded average rating.
#[derive(Serialize)]
pub struct ProfessorWithRating {
    pub id: String,
    pub name: String,
    pub rating: u8,
}

pub(super) async fn with_ratings(
    db: &Database,
    professors: Vec<entity::professors::Model>,
) -> Result<Vec<ProfessorWithRating>, ratings_lib::error::RatingsError> {
    let mut items = Vec::with_capacity(professors.len());
    for p in professors {
        let rating = professor::get_average_rating(&db.sql_conn, &p.id).await?;
        items.push(ProfessorWithRating {
            id: p.id,
            name: p.name,
            rating,
        });
    }
    Ok(items)
}

async fn professors_list(req_id: RequestId, db: Res<Database>) -> RatingsResponse<impl Responder> {
    let cache = RedisCache::new(db.redis_pool.clone());

    if let Some(res) = cached::lookup(&cache, professors_list_key()).await {
        return Ok(res);
    }

    let professors = professor::get_all_professors(&db.sql_conn)
        .await
        .fit(req_id)?;
    let items = with_ratings(&db, professors).await.fit(req_id)?;

    Ok(cached::store(&cache, professors_list_key(), &items).await)
}

async fn professor_detail(
    req_id: RequestId,
    db: Res<Database>,
    path: Path<String>,
) -> RatingsResponse<impl Responder> {
    let professor_id = path.into_inner();
    let cache = RedisCache::new(db.redis_pool.clone());

    if let Some(res) = cached::lookup(&cache, professor_key(professor_id.clone())).await {
        return Ok(res);
    }

    let professor = must::have_professor(&db.sql_conn, &professor_id)
        .await
        .fit(req_id)?;
    let rating = professor::get_average_rating(&db.sql_conn, &professor.id)
        .await
        .fit(req_id)?;

    let item = ProfessorWithRating {
        id: professor.id,
        name: professor.name,
        rating,
    };

    Ok(cached::store(&cache, professor_key(item.id.clone()), &item).await)
}

#[derive(Deserialize)]
pub struct CreateProfessorBody {
    id: String,
    name: String,
}

async fn professor_create(
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<CreateProfessorBody>,
) -> RatingsResponse<impl Responder> {
    for (field, value) in [("id", &body.id), ("name", &body.name)] {
        if value.trim().is_empty() {
            return Err(RatingsErrorKind::MissingField(field)).fit(req_id);
        }
    }

    let professor = professor::insert_professor(&db.sql_conn, body.id.trim(), body.name.trim())
        .await
        .fit(req_id)?;

    json(ProfessorWithRating {
        id: professor.id,
        name: professor.name,
        rating: 0,
    })
}

/// The average rating of a professor in a module, aggregated across every
/// instance of the module.
#[derive(Serialize)]
struct ModuleAverageResponse {
    professor_id: String,
    professor_name: String,
    module_code: String,
    module_name: String,
    average_rating: u8,
}

async fn module_average(
    req_id: RequestId,
    db: Res<Database>,
    path: Path<(String, String)>,
) -> RatingsResponse<impl Responder> {
    let (professor_id, module_code) = path.into_inner();
    let cache = RedisCache::new(db.redis_pool.clone());

    if let Some(res) =
        cached::lookup_field(&cache, module_key(module_code.clone()), &professor_id).await
    {
        return Ok(res);
    }

    let professor = must::have_professor(&db.sql_conn, &professor_id)
        .await
        .fit(req_id)?;
    let module = must::have_module(&db.sql_conn, &module_code)
        .await
        .fit(req_id)?;

    let average = professor::get_module_average_rating(&db.sql_conn, &professor.id, &module.code)
        .await
        .fit(req_id)?;

    // Entities are fine but no rating matches: "no content", not a 404.
    let Some(average_rating) = average else {
        return Ok(HttpResponse::NoContent().finish());
    };

    let item = ModuleAverageResponse {
        professor_id: professor.id,
        professor_name: professor.name,
        module_code: module.code,
        module_name: module.name,
        average_rating,
    };

    Ok(cached::store_field(
        &cache,
        module_key(item.module_code.clone()),
        &item.professor_id,
        &item,
    )
    .await)
}
