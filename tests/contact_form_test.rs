mod common;

use actix_web::{test, App};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serial_test::serial;

use bouwcms::orm::email_logs;
use bouwcms::session::session_cookie;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_initialize_seeds_the_default_form_once() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/contact-form-settings/initialize")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let fields = body.as_array().expect("Fields should be a list");
    assert_eq!(fields.len(), 7);
    let keys: Vec<&str> = fields
        .iter()
        .map(|f| f["fieldKey"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "first_name",
            "last_name",
            "email",
            "phone",
            "company",
            "project_type",
            "message"
        ]
    );

    // A populated table refuses a second initialization.
    let req = test::TestRequest::post()
        .uri("/api/admin/contact-form-settings/initialize")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_create_field_rejects_duplicate_key() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    create_test_contact_field(&db, "first_name", 1, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/contact-form-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "fieldKey": "first_name",
            "labelNl": "Voornaam",
            "labelEn": "First Name",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_move_field_swaps_with_its_neighbor() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    create_test_contact_field(&db, "first_name", 1, true, true)
        .await
        .expect("Failed to create field");
    let last_name = create_test_contact_field(&db, "last_name", 2, true, true)
        .await
        .expect("Failed to create field");
    create_test_contact_field(&db, "email", 3, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/admin/contact-form-settings/{}/move",
            last_name.id
        ))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "direction": "up" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fieldKey"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["last_name", "first_name", "email"]);
    assert_eq!(
        body[2]["order"], 3,
        "The uninvolved field keeps its order value"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_move_at_the_edge_changes_nothing() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    let first = create_test_contact_field(&db, "first_name", 1, true, true)
        .await
        .expect("Failed to create field");
    create_test_contact_field(&db, "last_name", 2, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/contact-form-settings/{}/move", first.id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "direction": "up" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "Edge moves are a quiet no-op");

    let body: serde_json::Value = test::read_body_json(resp).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fieldKey"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["first_name", "last_name"]);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_move_unknown_field_is_not_found() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/contact-form-settings/onbekend/move")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "direction": "down" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_update_field_never_rewrites_the_key() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    let field = create_test_contact_field(&db, "message", 1, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/contact-form-settings/{}", field.id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "fieldKey": "gekaapt",
            "labelNl": "Uw bericht",
            "isRequired": false,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["fieldKey"], "message",
        "The field key is fixed at creation"
    );
    assert_eq!(body["labelNl"], "Uw bericht");
    assert_eq!(body["isRequired"], false);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_public_form_lists_visible_fields_only() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    create_test_contact_field(&db, "first_name", 2, true, true)
        .await
        .expect("Failed to create field");
    create_test_contact_field(&db, "email", 1, true, true)
        .await
        .expect("Failed to create field");
    create_test_contact_field(&db, "intern_veld", 3, false, false)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/contact-form-settings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fieldKey"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["email", "first_name"], "Ordered, hidden dropped");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_submit_inquiry_stores_row_and_logs_notifications() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    create_test_contact_field(&db, "first_name", 1, true, true)
        .await
        .expect("Failed to create field");
    create_test_contact_field(&db, "email", 2, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(serde_json::json!({
            "first_name": "Anja",
            "last_name": "de Vries",
            "email": "Anja@Example.COM",
            "message": "Graag een offerte voor een dakkapel.",
            "phone": "06-12345678",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "Submission should succeed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "new");
    assert_eq!(body["email"], "anja@example.com");
    assert_eq!(body["phone"], "06-12345678");

    // Both notification kinds are on by default and land in the log.
    let visitor_mail = email_logs::Entity::find()
        .filter(email_logs::Column::Recipient.eq("anja@example.com"))
        .one(&db)
        .await
        .expect("Failed to query email logs");
    assert!(
        visitor_mail.is_some(),
        "Visitor confirmation should be logged"
    );
    let admin_mail = email_logs::Entity::find()
        .filter(email_logs::Column::Recipient.eq("info@localhost"))
        .one(&db)
        .await
        .expect("Failed to query email logs");
    assert!(
        admin_mail.is_some(),
        "Admin notification should be logged"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_submit_inquiry_enforces_required_fields() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    create_test_contact_field(&db, "phone", 1, true, true)
        .await
        .expect("Failed to create field");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    // Everything the storage needs is present, but the configured
    // required phone field is not.
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(serde_json::json!({
            "first_name": "Anja",
            "last_name": "de Vries",
            "email": "anja@example.com",
            "message": "Graag een offerte.",
            "phone": "   ",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let resp_body = test::read_body(resp).await;
    let resp_body = String::from_utf8(resp_body.to_vec()).unwrap();
    assert_eq!(resp_body, "Field 'phone' is required");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_submit_inquiry_rejects_invalid_email() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(serde_json::json!({
            "first_name": "Anja",
            "last_name": "de Vries",
            "email": "geen-adres",
            "message": "Graag een offerte.",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(body, "Invalid email address");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_inquiry_status_lifecycle() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::contact::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(serde_json::json!({
            "first_name": "Kees",
            "last_name": "Jansen",
            "email": "kees@example.com",
            "message": "Wanneer kunnen jullie langskomen?",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let inquiry_id = body["id"].as_str().unwrap().to_owned();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/contact-inquiries/{}", inquiry_id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "archived");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/contact-inquiries/{}", inquiry_id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri("/api/admin/contact-inquiries")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
