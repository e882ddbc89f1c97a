use actix_web::test;
use entity::module_instances;
use sea_orm::{EntityTrait, PaginatorTrait as _};

mod base;

/// Setup: the seeded catalog (one CD1 instance in 2026 semester 1)
/// Test: POST /module-instances with the same (module, year, semester) triple
/// Expected: a conflict error, and no second row.
#[tokio::test]
async fn duplicate_offering_is_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    let res = base::post_json(
        &app,
        "/module-instances",
        serde_json::json!({
            "module_code": "CD1",
            "year": 2026,
            "semester": 1,
            "professor_ids": ["JE1"],
        }),
    )
    .await;
    assert_eq!(res.status(), 409);

    let body = test::read_body(res).await;
    let err = base::try_from_slice::<base::ErrorResponse>(&body)?;
    assert_eq!(err.r#type, 310);

    let count = module_instances::Entity::find().count(&db.sql_conn).await?;
    assert_eq!(count, 2);

    Ok(())
}

/// Setup: the seeded catalog
/// Test: POST /module-instances for the same module in another semester
/// Expected: the second offering is accepted.
#[tokio::test]
async fn same_module_other_semester_is_accepted() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    let res = base::post_json(
        &app,
        "/module-instances",
        serde_json::json!({
            "module_code": "CD1",
            "year": 2026,
            "semester": 2,
            "professor_ids": ["JE1"],
        }),
    )
    .await;
    assert_eq!(res.status(), 200);

    let count = module_instances::Entity::find().count(&db.sql_conn).await?;
    assert_eq!(count, 3);

    Ok(())
}

/// Setup: the seeded catalog
/// Test: POST /module-instances with unknown references
/// Expected: 404 for an unknown module or professor, and no row created.
#[tokio::test]
async fn unknown_references_are_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    let res = base::post_json(
        &app,
        "/module-instances",
        serde_json::json!({
            "module_code": "NOPE",
            "year": 2027,
            "semester": 1,
        }),
    )
    .await;
    assert_eq!(res.status(), 404);

    let res = base::post_json(
        &app,
        "/module-instances",
        serde_json::json!({
            "module_code": "CD1",
            "year": 2027,
            "semester": 1,
            "professor_ids": ["NOPE"],
        }),
    )
    .await;
    assert_eq!(res.status(), 404);

    let count = module_instances::Entity::find().count(&db.sql_conn).await?;
    assert_eq!(count, 2);

    Ok(())
}

/// Setup: an empty store
/// Test: POST /modules and /professors twice with the same key
/// Expected: a conflict error on the second creation.
#[tokio::test]
async fn duplicate_catalog_keys_are_rejected() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    let res = base::post_json(
        &app,
        "/professors",
        serde_json::json!({ "id": "JE1", "name": "J. Excellent" }),
    )
    .await;
    assert_eq!(res.status(), 200);
    let res = base::post_json(
        &app,
        "/professors",
        serde_json::json!({ "id": "JE1", "name": "J. Other" }),
    )
    .await;
    assert_eq!(res.status(), 409);

    let res = base::post_json(
        &app,
        "/modules",
        serde_json::json!({ "code": "CD1", "name": "Compiler Design" }),
    )
    .await;
    assert_eq!(res.status(), 200);
    let res = base::post_json(
        &app,
        "/modules",
        serde_json::json!({ "code": "CD1", "name": "Chair Design" }),
    )
    .await;
    assert_eq!(res.status(), 409);

    Ok(())
}
