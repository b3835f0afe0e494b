mod common;

use actix_web::{test, App};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr};
use serial_test::serial;
use uuid::Uuid;

use bouwcms::orm::email_logs::{self, DeliveryStatus};
use bouwcms::session::session_cookie;
use common::*;

async fn insert_log(
    db: &DatabaseConnection,
    recipient: &str,
    minutes_ago: i64,
) -> Result<email_logs::Model, DbErr> {
    email_logs::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        recipient: Set(recipient.to_owned()),
        subject: Set("Bevestiging van uw aanvraag".to_owned()),
        template_key: Set(Some("contact_confirmation".to_owned())),
        status: Set(DeliveryStatus::Mocked),
        error: Set(None),
        created_at: Set(Utc::now().naive_utc() - Duration::minutes(minutes_ago)),
    }
    .insert(db)
    .await
}

fn template_payload(key: &str) -> serde_json::Value {
    serde_json::json!({
        "templateKey": key,
        "subjectNl": "Bedankt voor uw bericht",
        "subjectEn": "Thank you for your message",
        "bodyNl": "Beste {{name}}, wij nemen contact op.",
        "bodyEn": "Dear {{name}}, we will be in touch.",
    })
}

#[actix_rt::test]
#[serial]
async fn test_email_settings_default_then_patch() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/email-settings")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fromName"], "BouwMeesters Amsterdam");
    assert_eq!(body["notificationAddress"], "info@bouwmeesters.nl");
    assert_eq!(body["sendVisitorConfirmation"], true);
    assert_eq!(body["sendAdminNotification"], true);

    let req = test::TestRequest::put()
        .uri("/api/admin/email-settings")
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({ "sendVisitorConfirmation": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["sendVisitorConfirmation"], false);
    assert_eq!(
        body["sendAdminNotification"], true,
        "One toggle does not drag the other along"
    );
    assert_eq!(body["fromName"], "BouwMeesters Amsterdam");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_template_create_and_duplicate_key_conflict() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/email-templates")
        .cookie(session_cookie(&admin.id))
        .set_json(template_payload("contact_confirmation"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["templateKey"], "contact_confirmation");
    assert_eq!(body["isActive"], true);

    let req = test::TestRequest::post()
        .uri("/api/admin/email-templates")
        .cookie(session_cookie(&admin.id))
        .set_json(template_payload("contact_confirmation"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "A template with this key already exists"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_template_key_survives_updates() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/email-templates")
        .cookie(session_cookie(&admin.id))
        .set_json(template_payload("password_reset"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/email-templates/{}", id))
        .cookie(session_cookie(&admin.id))
        .set_json(serde_json::json!({
            "templateKey": "iets_anders",
            "subjectNl": "Wachtwoord opnieuw instellen",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["templateKey"], "password_reset",
        "The key is what the sender looks up; it is fixed at creation"
    );
    assert_eq!(body["subjectNl"], "Wachtwoord opnieuw instellen");
    assert_eq!(body["subjectEn"], "Thank you for your message");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_template_requires_subjects() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let mut payload = template_payload("nieuwsbrief");
    payload["subjectNl"] = serde_json::json!("");
    let req = test::TestRequest::post()
        .uri("/api/admin/email-templates")
        .cookie(session_cookie(&admin.id))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_delete_template_then_404() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/email-templates")
        .cookie(session_cookie(&admin.id))
        .set_json(template_payload("contact_notification"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let created: serde_json::Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/email-templates/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/email-templates/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Email template not found"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_email_logs_are_newest_first() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    insert_log(&db, "oud@voorbeeld.nl", 30)
        .await
        .expect("Failed to insert log");
    insert_log(&db, "nieuw@voorbeeld.nl", 1)
        .await
        .expect("Failed to insert log");
    insert_log(&db, "midden@voorbeeld.nl", 10)
        .await
        .expect("Failed to insert log");

    let app = test::init_service(App::new().configure(bouwcms::web::email_admin::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/email-logs")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let recipients: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["recipient"].as_str().unwrap())
        .collect();
    assert_eq!(
        recipients,
        vec!["nieuw@voorbeeld.nl", "midden@voorbeeld.nl", "oud@voorbeeld.nl"]
    );
    assert_eq!(body[0]["status"], "mocked");

    // The log is admin-only.
    let req = test::TestRequest::get().uri("/api/admin/email-logs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
