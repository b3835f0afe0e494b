mod common;

use actix_web::{test, App};
use serial_test::serial;

use bouwcms::session::session_cookie;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_company_details_default_then_patch() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::company::configure)).await;

    // The public endpoint serves defaults even before anything is saved.
    let req = test::TestRequest::get().uri("/api/company-details").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["companyName"], "BouwMeesters Amsterdam BV");
    assert_eq!(body["kvkNumber"], "12345678");
    assert_eq!(body["city"], "Amsterdam");

    let req = test::TestRequest::put()
        .uri("/api/admin/company-details")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "phone": "+31 20 765 4321" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["phone"], "+31 20 765 4321");
    assert_eq!(body["kvkNumber"], "12345678");
    assert_eq!(body["btwNumber"], "NL123456789B01");

    let req = test::TestRequest::get().uri("/api/company-details").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["phone"], "+31 20 765 4321");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_contact_info_patch_opening_hours() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::company::configure)).await;

    let req = test::TestRequest::get().uri("/api/contact-info").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["openingHoursNl"], "Ma t/m Vr: 08:00 - 17:00");

    let req = test::TestRequest::put()
        .uri("/api/admin/contact-info")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "openingHoursNl": "Ma t/m Za: 07:00 - 18:00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["openingHoursNl"], "Ma t/m Za: 07:00 - 18:00");
    assert_eq!(body["openingHoursEn"], "Mon-Fri: 08:00 - 17:00");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_footer_settings_patch_keeps_other_fields() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::company::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/footer-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "showNewsletter": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["showNewsletter"], false);
    assert_eq!(body["newsletterTitleNl"], "Blijf op de hoogte");
    assert_eq!(body["showSocialLinks"], true);

    let req = test::TestRequest::get().uri("/api/footer-settings").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["showNewsletter"], false);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_social_link_crud_and_public_visibility() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::company::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/social-media-links")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "platform": "LinkedIn",
            "url": "dit is geen url",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/api/admin/social-media-links")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "platform": "LinkedIn",
            "url": "https://www.linkedin.com/company/bouwmeesters",
            "icon": "linkedin",
            "order": 2,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let linkedin: serde_json::Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/social-media-links")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "platform": "Instagram",
            "url": "https://www.instagram.com/bouwmeesters",
            "order": 1,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/social-media-links").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let platforms: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["platform"].as_str().unwrap())
        .collect();
    assert_eq!(platforms, vec!["Instagram", "LinkedIn"]);

    let id = linkedin["id"].as_str().unwrap();
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/social-media-links/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/social-media-links/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Social media link not found"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_company_admin_endpoints_require_session() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::company::configure)).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/company-details")
        .set_json(serde_json::json!({ "phone": "+31 6 12345678" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let req = test::TestRequest::get()
        .uri("/api/admin/social-media-links")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
