mod common;

use actix_web::{test, App};
use sea_orm::EntityTrait;
use serial_test::serial;

use bouwcms::orm::hero_content;
use bouwcms::session::session_cookie;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_hero_defaults_served_when_table_is_empty() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    let req = test::TestRequest::get().uri("/api/hero-content").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Welkom bij BouwMeesters Amsterdam");
    assert_eq!(body["isActive"], true);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_hero_patch_upserts_the_fixed_row() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    // First write inserts the row, seeding unpatched fields from the
    // defaults.
    let req = test::TestRequest::put()
        .uri("/api/admin/hero-content")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "titleNl": "Bouwen met Vertrouwen" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "default");
    assert_eq!(body["titleNl"], "Bouwen met Vertrouwen");
    assert_eq!(body["titleEn"], "Welcome to BouwMeesters Amsterdam");

    // Second write updates the same row.
    let req = test::TestRequest::put()
        .uri("/api/admin/hero-content")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "subtitleNl": "Al dertig jaar een begrip" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["titleNl"], "Bouwen met Vertrouwen",
        "Earlier edits should survive later patches"
    );
    assert_eq!(body["subtitleNl"], "Al dertig jaar een begrip");

    let rows = hero_content::Entity::find()
        .all(&db)
        .await
        .expect("Failed to count hero rows");
    assert_eq!(rows.len(), 1, "The hero section is a single row");

    // The public route reflects the stored content.
    let req = test::TestRequest::get().uri("/api/hero-content").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Bouwen met Vertrouwen");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_hero_rejects_empty_title() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/hero-content")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "titleNl": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_hero_update_requires_authentication() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/hero-content")
        .set_json(serde_json::json!({ "titleNl": "Gekaapt" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_about_patch_keeps_default_feature_list() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/about-content")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "missionNl": "Elke dag beter bouwen",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["missionNl"], "Elke dag beter bouwen");
    let features = body["features"].as_array().expect("Features should be a list");
    assert!(
        !features.is_empty(),
        "Patching one field should keep the default feature list"
    );
    assert_eq!(features[0]["titleNl"], "Kwaliteit");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_about_us_page_patch_upserts_and_serves() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::content::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/about-us-page")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "storyNl": "Begonnen als timmerbedrijf aan de Amstel.",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "default");
    assert_eq!(body["storyNl"], "Begonnen als timmerbedrijf aan de Amstel.");
    assert!(
        body["companyValues"].as_array().is_some(),
        "Default company values should be seeded on first write"
    );

    let req = test::TestRequest::get().uri("/api/about-us-page").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["storyNl"], "Begonnen als timmerbedrijf aan de Amstel.");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
