use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use ratings_lib::cache::{RedisCache, module_instances_list_key};
use ratings_lib::{Database, module};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use super::professor::{ProfessorWithRating, with_ratings};
use crate::utils::json;
use crate::{FitRequestId as _, RatingsErrorKind, RatingsResponse, Res, cached};

pub fn module_scope() -> Scope {
    web::scope("")
        .route("/modules", web::get().to(modules_list))
        .route("/modules", web::post().to(module_create))
        .route("/module-instances", web::get().to(instances_list))
        .route("/module-instances", web::post().to(instance_create))
}

#[derive(Serialize)]
struct ModuleResponse {
    code: String,
    name: String,
}

async fn modules_list(req_id: RequestId, db: Res<Database>) -> RatingsResponse<impl Responder> {
    let modules = module::get_all_modules(&db.sql_conn).await.fit(req_id)?;

    json(
        modules
            .into_iter()
            .map(|m| ModuleResponse {
                code: m.code,
                name: m.name,
            })
            .collect::<Vec<_>>(),
    )
}

#[derive(Deserialize)]
pub struct CreateModuleBody {
    code: String,
    name: String,
}

async fn module_create(
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<CreateModuleBody>,
) -> RatingsResponse<impl Responder> {
    for (field, value) in [("code", &body.code), ("name", &body.name)] {
        if value.trim().is_empty() {
            return Err(RatingsErrorKind::MissingField(field)).fit(req_id);
        }
    }

    let module = module::insert_module(&db.sql_conn, body.code.trim(), body.name.trim())
        .await
        .fit(req_id)?;

    json(ModuleResponse {
        code: module.code,
        name: module.name,
    })
}

/// An offering of a module, with the professors teaching it.
#[derive(Serialize)]
struct ModuleInstanceResponse {
    module: ModuleResponse,
    year: i32,
    semester: u8,
    professors: Vec<ProfessorWithRating>,
}

async fn instances_list(req_id: RequestId, db: Res<Database>) -> RatingsResponse<impl Responder> {
    let cache = RedisCache::new(db.redis_pool.clone());

    if let Some(res) = cached::lookup(&cache, module_instances_list_key()).await {
        return Ok(res);
    }

    let instances = module::get_all_instances(&db.sql_conn).await.fit(req_id)?;

    let mut items = Vec::with_capacity(instances.len());
    for (instance, module) in instances {
        let module = module.unwrap_or_else(|| {
            panic!(
                "module instance {} should reference an existing module",
                instance.id
            )
        });

        let professors = module::get_instance_professors(&db.sql_conn, &instance)
            .await
            .fit(req_id)?;
        let professors = with_ratings(&db, professors).await.fit(req_id)?;

        items.push(ModuleInstanceResponse {
            module: ModuleResponse {
                code: module.code,
                name: module.name,
            },
            year: instance.year,
            semester: instance.semester,
            professors,
        });
    }

    Ok(cached::store(&cache, module_instances_list_key(), &items).await)
}

#[derive(Deserialize)]
pub struct CreateInstanceBody {
    module_code: String,
    year: i32,
    semester: u8,
    #[serde(default)]
    professor_ids: Vec<String>,
}

#[derive(Serialize)]
struct CreatedInstanceResponse {
    id: u32,
    module_code: String,
    year: i32,
    semester: u8,
}

async fn instance_create(
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<CreateInstanceBody>,
) -> RatingsResponse<impl Responder> {
    if body.module_code.trim().is_empty() {
        return Err(RatingsErrorKind::MissingField("module_code")).fit(req_id);
    }

    let instance = module::insert_instance(
        &db.sql_conn,
        body.module_code.trim(),
        body.year,
        body.semester,
        &body.professor_ids,
    )
    .await
    .fit(req_id)?;

    json(CreatedInstanceResponse {
        id: instance.id,
        module_code: instance.module_code,
        year: instance.year,
        semester: instance.semester,
    })
}
