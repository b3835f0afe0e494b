mod common;

use actix_web::{test, App};
use serial_test::serial;

use bouwcms::session::session_cookie;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_team_member_create_with_string_lists() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::team::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/team-members")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Jan de Boer",
            "roleNl": "Projectleider",
            "roleEn": "Project lead",
            "specialties": ["Restauratie", "Monumenten"],
            "order": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Jan de Boer");
    assert_eq!(
        body["specialties"],
        serde_json::json!(["Restauratie", "Monumenten"])
    );
    // Lists that were never filled in stay null rather than [].
    assert!(body["skills"].is_null());
    assert_eq!(body["isActive"], true);

    let req = test::TestRequest::get().uri("/api/team-members").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["roleNl"], "Projectleider");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_team_member_rejects_invalid_email() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::team::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/team-members")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Jan de Boer",
            "roleNl": "Projectleider",
            "roleEn": "Project lead",
            "email": "geen-adres",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_team_settings_default_then_patch() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::team::configure)).await;

    let req = test::TestRequest::get().uri("/api/team-settings").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Ons Team");
    assert_eq!(body["titleEn"], "Our Team");

    let req = test::TestRequest::put()
        .uri("/api/admin/team-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "titleNl": "Onze mensen" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Onze mensen");
    assert_eq!(body["titleEn"], "Our Team");

    let req = test::TestRequest::get().uri("/api/team-settings").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Onze mensen");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_partner_url_validation_and_visibility() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::partners::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/partners")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Hout & Zo",
            "websiteUrl": "geen geldige url",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/api/admin/partners")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Hout & Zo",
            "websiteUrl": "https://houtenzo.nl",
            "order": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/admin/partners")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Steenhandel Noord",
            "order": 2,
            "isActive": false,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/partners").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Hout & Zo");

    let req = test::TestRequest::get()
        .uri("/api/admin/partners")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_partner_update_and_delete() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::partners::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/partners")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "name": "Kozijnen West",
            "descriptionNl": "Levert al onze kozijnen.",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/partners/{}", id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "logo": "/uploads/kozijnen.png" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["logo"], "/uploads/kozijnen.png");
    assert_eq!(body["descriptionNl"], "Levert al onze kozijnen.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/partners/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/partners/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "Partner not found");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_partners_settings_default_title() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::partners::configure)).await;

    let req = test::TestRequest::get().uri("/api/partners-settings").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Onze Partners");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_initiative_lifecycle() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::initiatives::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/company-initiatives")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "titleNl": "Circulair bouwen",
            "titleEn": "Circular construction",
            "descriptionNl": "Hergebruik van materialen op elke bouwplaats.",
            "descriptionEn": "Material reuse on every site.",
            "icon": "recycle",
            "order": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["titleNl"], "Circulair bouwen");

    let req = test::TestRequest::get().uri("/api/company-initiatives").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/company-initiatives/{}", id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/company-initiatives").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/company-initiatives/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/company-initiatives/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Initiative not found"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_initiative_statistics_and_settings() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::initiatives::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/initiative-statistics")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "labelNl": "Bespaard beton",
            "labelEn": "Concrete saved",
            "value": "1200",
            "suffix": "ton",
            "order": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["value"], "1200");
    assert_eq!(created["suffix"], "ton");

    // A statistic without a value is useless on the page.
    let req = test::TestRequest::post()
        .uri("/api/admin/initiative-statistics")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "labelNl": "Leeg",
            "labelEn": "Empty",
            "value": "",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::get().uri("/api/initiative-statistics").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["labelNl"], "Bespaard beton");

    let req = test::TestRequest::get()
        .uri("/api/company-initiatives-settings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Onze Initiatieven");

    let req = test::TestRequest::put()
        .uri("/api/admin/company-initiatives-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "titleNl": "Duurzaam bezig" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/api/company-initiatives-settings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["titleNl"], "Duurzaam bezig");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
