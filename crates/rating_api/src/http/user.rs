use actix_web::{
    Responder, Scope,
    web::{self, Json},
};
use ratings_lib::{Database, user};
use serde::{Deserialize, Serialize};
use sha256::digest;
use tracing_actix_web::RequestId;

use crate::auth;
use crate::utils::json;
use crate::{FitRequestId as _, RatingsErrorKind, RatingsResponse, Res};

pub fn user_scope() -> Scope {
    web::scope("/user")
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
}

#[derive(Deserialize)]
pub struct RegisterBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    username: String,
}

async fn register(
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<RegisterBody>,
) -> RatingsResponse<impl Responder> {
    for (field, value) in [
        ("username", &body.username),
        ("email", &body.email),
        ("password", &body.password),
    ] {
        if value.trim().is_empty() {
            return Err(RatingsErrorKind::MissingField(field)).fit(req_id);
        }
    }

    let user = user::insert_user(
        &db.sql_conn,
        body.username.trim(),
        body.email.trim(),
        &digest(&*body.password),
    )
    .await
    .fit(req_id)?;

    json(RegisterResponse {
        username: user.login,
    })
}

#[derive(Deserialize)]
pub struct LoginBody {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
}

async fn login(
    req_id: RequestId,
    db: Res<Database>,
    Json(body): Json<LoginBody>,
) -> RatingsResponse<impl Responder> {
    let user = user::get_user_from_login(&db.sql_conn, &body.username)
        .await
        .fit(req_id)?;

    let Some(user) = user else {
        return Err(RatingsErrorKind::InvalidCredentials).fit(req_id);
    };

    if user.password_hash != digest(&*body.password) {
        return Err(RatingsErrorKind::InvalidCredentials).fit(req_id);
    }

    let token = auth::gen_token_for(&db.sql_conn, user.id)
        .await
        .fit(req_id)?;

    json(LoginResponse { token })
}
