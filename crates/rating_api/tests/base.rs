#![allow(dead_code)]

use std::fmt;

use actix_http::Request;
use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test,
};
use migration::MigratorTrait as _;
use mkenv::prelude::*;
use ratings_lib::{Database, LibEnv};
use sea_orm::ConnectOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::fmt::TestWriter;

use rating_api_lib::configure;

#[derive(Debug, serde::Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
}

fn init_env() {
    let _ = tracing_subscriber::fmt()
        .with_writer(TestWriter::new())
        .try_init();

    ratings_lib::init_env(LibEnv::define());
}

/// Returns a [`Database`] over a fresh in-memory SQLite store carrying the
/// full schema.
///
/// The Redis pool points to an unreachable address on purpose: the response
/// cache degrades to the store on cache errors, which is the behavior under
/// test. The single-connection pool keeps every query on the same in-memory
/// database.
pub async fn get_db() -> anyhow::Result<Database> {
    init_env();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let sql_conn = sea_orm::Database::connect(options).await?;

    migration::Migrator::up(&sql_conn, None).await?;

    let db = Database::from_sql_conn(sql_conn, "redis://127.0.0.1:1".to_owned())?;
    Ok(db)
}

pub async fn get_app(
    db: Database,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(TracingLogger::<configure::CustomRootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone())),
    )
    .await
}

#[derive(Debug)]
pub enum ApiError {
    InvalidJson(Vec<u8>, serde_json::Error),
    UnexpectedJson(serde_json::Value, serde_json::Error),
    Error { r#type: i32, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidJson(raw, deser_err) => match str::from_utf8(raw) {
                Ok(s) => write!(
                    f,
                    "Invalid JSON returned by the API: {s}\nError when deserializing: {deser_err}"
                ),
                Err(_) => write!(
                    f,
                    "Invalid JSON returned by the API, with some non-UTF8 characters: {raw:?}"
                ),
            },
            ApiError::UnexpectedJson(json, deser_err) => {
                write!(
                    f,
                    "Unexpected JSON returned by the API:\n{json:#}\nError when deserializing: {deser_err}"
                )
            }
            ApiError::Error { r#type, message } => {
                f.write_str("Error returned from API: ")?;
                f.debug_map()
                    .entry(&"type", r#type)
                    .entry(&"message", message)
                    .finish()
            }
        }
    }
}

impl std::error::Error for ApiError {}

pub fn try_from_slice<'de, T>(slice: &'de [u8]) -> Result<T, ApiError>
where
    T: serde::Deserialize<'de>,
{
    match serde_json::from_slice(slice) {
        Ok(t) => Ok(t),
        Err(e) => match serde_json::from_slice::<serde_json::Value>(slice) {
            Ok(json) => match serde_json::from_value::<ErrorResponse>(json.clone()) {
                Ok(err) => Err(ApiError::Error {
                    r#type: err.r#type,
                    message: err.message.clone(),
                }),
                Err(_) => Err(ApiError::UnexpectedJson(json, e)),
            },
            Err(e) => Err(ApiError::InvalidJson(slice.to_vec(), e)),
        },
    }
}

pub async fn post_json<S, B>(app: &S, uri: &str, body: serde_json::Value) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    test::call_service(app, req).await
}

/// Registers a user through the API and logs it in, returning its token.
pub async fn register_and_login<S, B>(app: &S, username: &str) -> anyhow::Result<String>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let res = post_json(
        app,
        "/user/register",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.org"),
            "password": "correct horse",
        }),
    )
    .await;
    anyhow::ensure!(
        res.status().is_success(),
        "registration of `{username}` failed: {}",
        res.status()
    );

    let res = post_json(
        app,
        "/user/login",
        serde_json::json!({
            "username": username,
            "password": "correct horse",
        }),
    )
    .await;
    anyhow::ensure!(
        res.status().is_success(),
        "login of `{username}` failed: {}",
        res.status()
    );

    #[derive(serde::Deserialize)]
    struct LoginResponse {
        token: String,
    }

    let body = test::read_body(res).await;
    let res: LoginResponse = try_from_slice(&body)?;
    Ok(res.token)
}

/// Seeds a small catalog: professors `JE1` and `MK2`, modules `CD1` and
/// `AB2`, one instance of each module in 2026 semester 1, both taught by the
/// two professors.
pub async fn seed_catalog<S, B>(app: &S) -> anyhow::Result<()>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    for (id, name) in [("JE1", "J. Excellent"), ("MK2", "M. Keen")] {
        let res = post_json(
            app,
            "/professors",
            serde_json::json!({ "id": id, "name": name }),
        )
        .await;
        anyhow::ensure!(
            res.status().is_success(),
            "creation of professor `{id}` failed: {}",
            res.status()
        );
    }

    for (code, name) in [
        ("CD1", "Compiler Design"),
        ("AB2", "Abstract Beekeeping"),
    ] {
        let res = post_json(
            app,
            "/modules",
            serde_json::json!({ "code": code, "name": name }),
        )
        .await;
        anyhow::ensure!(
            res.status().is_success(),
            "creation of module `{code}` failed: {}",
            res.status()
        );

        let res = post_json(
            app,
            "/module-instances",
            serde_json::json!({
                "module_code": code,
                "year": 2026,
                "semester": 1,
                "professor_ids": ["JE1", "MK2"],
            }),
        )
        .await;
        anyhow::ensure!(
            res.status().is_success(),
            "creation of the instance of `{code}` failed: {}",
            res.status()
        );
    }

    Ok(())
}

/// Submits a rating as the provided user, returning the raw response.
pub async fn submit_rating<S, B>(
    app: &S,
    username: &str,
    token: &str,
    professor: &str,
    module_code: &str,
    rating: u8,
) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/ratings")
        .insert_header(("UserLogin", username))
        .insert_header(("Authorization", token))
        .set_json(serde_json::json!({
            "professor": professor,
            "module_code": module_code,
            "year": 2026,
            "semester": 1,
            "rating": rating,
        }))
        .to_request();
    test::call_service(app, req).await
}

#[derive(Debug, PartialEq, serde::Deserialize)]
pub struct RatingResponse {
    pub id: u32,
    pub user: String,
    pub professor: String,
    pub module_code: String,
    pub year: i32,
    pub semester: u8,
    pub rating: u8,
}
