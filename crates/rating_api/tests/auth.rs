use actix_web::test;

mod base;

/// Setup: an empty store
/// Test: POST /user/register twice with the same username
/// Expected: a conflict error on the second registration.
#[tokio::test]
async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    let res = base::post_json(
        &app,
        "/user/register",
        serde_json::json!({
            "username": "alice",
            "email": "alice@example.org",
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(res.status(), 200);

    let res = base::post_json(
        &app,
        "/user/register",
        serde_json::json!({
            "username": "alice",
            "email": "other@example.org",
            "password": "battery staple",
        }),
    )
    .await;
    assert_eq!(res.status(), 409);

    let body = test::read_body(res).await;
    let err = base::try_from_slice::<base::ErrorResponse>(&body)?;
    assert_eq!(err.r#type, 311);

    Ok(())
}

/// Setup: an empty store
/// Test: POST /user/register with an empty field
/// Expected: a validation error naming the field.
#[tokio::test]
async fn empty_fields_are_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    let res = base::post_json(
        &app,
        "/user/register",
        serde_json::json!({
            "username": "alice",
            "email": "  ",
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(res.status(), 400);

    let body = test::read_body(res).await;
    let err = base::try_from_slice::<base::ErrorResponse>(&body)?;
    assert_eq!(err.r#type, 302);
    assert!(err.message.contains("email"));

    Ok(())
}

/// Setup: one registered user
/// Test: POST /user/login with a wrong password or an unknown username
/// Expected: 401 in both cases.
#[tokio::test]
async fn bad_credentials_are_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::register_and_login(&app, "alice").await?;

    let res = base::post_json(
        &app,
        "/user/login",
        serde_json::json!({
            "username": "alice",
            "password": "wrong",
        }),
    )
    .await;
    assert_eq!(res.status(), 401);

    let res = base::post_json(
        &app,
        "/user/login",
        serde_json::json!({
            "username": "nobody",
            "password": "wrong",
        }),
    )
    .await;
    assert_eq!(res.status(), 401);

    Ok(())
}

/// Setup: one registered user
/// Test: logging in twice, then using each token
/// Expected: the second login replaces the token, so the first one stops working.
#[tokio::test]
async fn relogin_replaces_the_token() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;
    let first = base::register_and_login(&app, "alice").await?;

    let res = base::post_json(
        &app,
        "/user/login",
        serde_json::json!({
            "username": "alice",
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(res.status(), 200);
    let body = test::read_body(res).await;

    #[derive(serde::Deserialize)]
    struct LoginResponse {
        token: String,
    }
    let second = base::try_from_slice::<LoginResponse>(&body)?.token;
    assert_ne!(first, second);

    let res = base::submit_rating(&app, "alice", &first, "JE1", "CD1", 3).await;
    assert_eq!(res.status(), 401);

    let res = base::submit_rating(&app, "alice", &second, "JE1", "CD1", 3).await;
    assert_eq!(res.status(), 200);

    Ok(())
}

/// Setup: nothing
/// Test: a request to an unknown route
/// Expected: the API's own Not Found response.
#[tokio::test]
async fn unknown_routes_get_the_api_not_found() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    let req = test::TestRequest::get().uri("/nothing/here").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);

    let body = test::read_body(res).await;
    let err = base::try_from_slice::<base::ErrorResponse>(&body)?;
    assert_eq!(err.r#type, 301);

    Ok(())
}
