mod common;

use actix_web::{test, App};
use serial_test::serial;

use bouwcms::session::session_cookie;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_upsert_creates_then_updates_in_place() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::site_settings::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/site-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "key": "site:tagline",
            "value": "Bouwen met vertrouwen",
            "category": "algemeen",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["key"], "site:tagline");
    assert_eq!(created["value"], "Bouwen met vertrouwen");
    assert_eq!(created["category"], "algemeen");

    // Same key again: the row is updated, not duplicated, and a missing
    // category leaves the stored one alone.
    let req = test::TestRequest::put()
        .uri("/api/admin/site-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "key": "site:tagline",
            "value": "Vakwerk sinds 1987",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["value"], "Vakwerk sinds 1987");
    assert_eq!(updated["category"], "algemeen");

    // Reads go through the in-process map.
    assert_eq!(
        bouwcms::site_config::get("site:tagline").as_deref(),
        Some("Vakwerk sinds 1987")
    );

    let req = test::TestRequest::get()
        .uri("/api/admin/site-settings")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_upsert_rejects_empty_key() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::site_settings::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/site-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "key": "", "value": "iets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_public_list_is_key_ordered() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::site_settings::configure)).await;

    for (key, value) in [("site:tagline", "Bouwen"), ("analytics:id", "UA-000")] {
        let req = test::TestRequest::put()
            .uri("/api/admin/site-settings")
            .cookie(session_cookie(&admin.id))
            .set_json(serde_json::json!({ "key": key, "value": value }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get().uri("/api/site-settings").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["analytics:id", "site:tagline"]);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_delete_setting_then_404() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::site_settings::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/site-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "key": "site:banner", "value": "Open huis zaterdag" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::delete()
        .uri("/api/admin/site-settings/site:banner")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);
    assert_eq!(bouwcms::site_config::get("site:banner"), None);

    let req = test::TestRequest::delete()
        .uri("/api/admin/site-settings/site:banner")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "Setting not found");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_admin_list_requires_session() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::site_settings::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/site-settings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
