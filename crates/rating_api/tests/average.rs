use actix_web::test;

mod base;

#[derive(Debug, serde::Deserialize)]
struct ProfessorResponse {
    id: String,
    name: String,
    rating: u8,
}

#[derive(Debug, serde::Deserialize)]
struct ModuleAverageResponse {
    professor_id: String,
    professor_name: String,
    module_code: String,
    module_name: String,
    average_rating: u8,
}

/// Setup: the seeded catalog, no rating
/// Test: GET /professors/{id}
/// Expected: an average of 0, not an error.
#[tokio::test]
async fn unrated_professor_has_average_zero() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    let req = test::TestRequest::get().uri("/professors/JE1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let professor = base::try_from_slice::<ProfessorResponse>(&body)?;
    assert_eq!(professor.id, "JE1");
    assert_eq!(professor.rating, 0);

    Ok(())
}

/// Setup: the seeded catalog; three users rate JE1 with 3, 4, 5 on CD1, and
/// one of them rates JE1 with 1 on AB2
/// Test: GET /professors/{id} and GET /professors/{id}/modules/{code}/average
/// Expected: the overall mean 3.25 rounds to 3, the in-module mean 4 stays 4.
#[tokio::test]
async fn averages_are_rounded_per_scope() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    for (login, score) in [("alice", 3), ("bob", 4), ("carol", 5)] {
        let token = base::register_and_login(&app, login).await?;
        let res = base::submit_rating(&app, login, &token, "JE1", "CD1", score).await;
        assert_eq!(res.status(), 200);
    }

    let token = base::register_and_login(&app, "dave").await?;
    let res = base::submit_rating(&app, "dave", &token, "JE1", "AB2", 1).await;
    assert_eq!(res.status(), 200);

    // Overall: mean(3, 4, 5, 1) = 3.25 -> 3
    let req = test::TestRequest::get().uri("/professors/JE1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body = test::read_body(res).await;
    let professor = base::try_from_slice::<ProfessorResponse>(&body)?;
    assert_eq!(professor.rating, 3);

    // In CD1: mean(3, 4, 5) = 4
    let req = test::TestRequest::get()
        .uri("/professors/JE1/modules/CD1/average")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body = test::read_body(res).await;
    let average = base::try_from_slice::<ModuleAverageResponse>(&body)?;
    assert_eq!(average.professor_id, "JE1");
    assert_eq!(average.professor_name, "J. Excellent");
    assert_eq!(average.module_code, "CD1");
    assert_eq!(average.module_name, "Compiler Design");
    assert_eq!(average.average_rating, 4);

    Ok(())
}

/// Setup: the seeded catalog, a rating of JE1 on CD1 only
/// Test: the in-module average for an unknown module, and for a known module
/// with no rating from that professor
/// Expected: 404 for the former, 204 (and not a 0 average) for the latter.
#[tokio::test]
async fn missing_module_and_missing_ratings_are_distinct() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;
    let token = base::register_and_login(&app, "alice").await?;
    let res = base::submit_rating(&app, "alice", &token, "JE1", "CD1", 5).await;
    assert_eq!(res.status(), 200);

    let req = test::TestRequest::get()
        .uri("/professors/JE1/modules/NOPE/average")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);

    let req = test::TestRequest::get()
        .uri("/professors/NOPE/modules/CD1/average")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 404);

    // JE1 exists, AB2 exists, but JE1 has no rating there.
    let req = test::TestRequest::get()
        .uri("/professors/JE1/modules/AB2/average")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 204);

    Ok(())
}

/// Setup: the seeded catalog, a rating on each professor
/// Test: GET /professors
/// Expected: every professor listed with its own rounded average.
#[tokio::test]
async fn professor_list_carries_averages() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;
    let token = base::register_and_login(&app, "alice").await?;
    let res = base::submit_rating(&app, "alice", &token, "JE1", "CD1", 5).await;
    assert_eq!(res.status(), 200);
    let res = base::submit_rating(&app, "alice", &token, "MK2", "CD1", 2).await;
    assert_eq!(res.status(), 200);

    let req = test::TestRequest::get().uri("/professors").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let professors = base::try_from_slice::<Vec<ProfessorResponse>>(&body)?;
    assert_eq!(professors.len(), 2);
    assert_eq!(professors[0].id, "JE1");
    assert_eq!(professors[0].rating, 5);
    assert_eq!(professors[1].id, "MK2");
    assert_eq!(professors[1].rating, 2);

    Ok(())
}

/// Setup: the seeded catalog
/// Test: GET /module-instances
/// Expected: each instance listed with its module and its professors.
#[tokio::test]
async fn instance_list_carries_modules_and_professors() -> anyhow::Result<()> {
    let db = base::get_db().await?;
    let app = base::get_app(db.clone()).await;

    base::seed_catalog(&app).await?;

    #[derive(Debug, serde::Deserialize)]
    struct ModuleResponse {
        code: String,
        name: String,
    }

    #[derive(Debug, serde::Deserialize)]
    struct InstanceResponse {
        module: ModuleResponse,
        year: i32,
        semester: u8,
        professors: Vec<ProfessorResponse>,
    }

    let req = test::TestRequest::get().uri("/module-instances").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);

    let body = test::read_body(res).await;
    let instances = base::try_from_slice::<Vec<InstanceResponse>>(&body)?;
    assert_eq!(instances.len(), 2);

    assert_eq!(instances[0].module.code, "AB2");
    assert_eq!(instances[0].module.name, "Abstract Beekeeping");
    assert_eq!(instances[1].module.code, "CD1");
    assert_eq!(instances[1].year, 2026);
    assert_eq!(instances[1].semester, 1);

    for instance in &instances {
        itertools::assert_equal(
            instance.professors.iter().map(|p| (p.id.as_str(), p.name.as_str())),
            [("JE1", "J. Excellent"), ("MK2", "M. Keen")],
        );
    }

    Ok(())
}
