mod common;

use actix_web::{test, App};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr};
use serial_test::serial;
use uuid::Uuid;

use bouwcms::orm::analytics_events;
use bouwcms::session::session_cookie;
use common::*;

async fn insert_event(
    db: &DatabaseConnection,
    event_type: &str,
    page_path: Option<&str>,
    days_ago: i64,
) -> Result<analytics_events::Model, DbErr> {
    analytics_events::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        event_type: Set(event_type.to_owned()),
        page_path: Set(page_path.map(|p| p.to_owned())),
        referrer: Set(None),
        user_agent: Set(Some("toetsbank/1.0".to_owned())),
        ip_address: Set(None),
        metadata: Set(None),
        created_at: Set(Utc::now().naive_utc() - Duration::days(days_ago)),
    }
    .insert(db)
    .await
}

#[actix_rt::test]
#[serial]
async fn test_track_event_is_public_and_counted() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::analytics::configure)).await;

    // No session cookie on the tracking call.
    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .set_json(serde_json::json!({
            "eventType": "page_view",
            "pagePath": "/diensten",
            "referrer": "https://www.google.nl/",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics/stats")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let stats: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(stats["totalEvents"], 1);
    assert_eq!(stats["countsByType"][0]["eventType"], "page_view");
    assert_eq!(stats["countsByType"][0]["count"], 1);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_track_requires_event_type() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::analytics::configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/analytics/track")
        .set_json(serde_json::json!({ "eventType": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "An event type is required"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_stats_aggregate_within_window() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    insert_event(&db, "page_view", Some("/diensten"), 0)
        .await
        .expect("Failed to insert event");
    insert_event(&db, "page_view", Some("/diensten"), 1)
        .await
        .expect("Failed to insert event");
    insert_event(&db, "page_view", Some("/over-ons"), 2)
        .await
        .expect("Failed to insert event");
    insert_event(&db, "contact_submit", None, 3)
        .await
        .expect("Failed to insert event");
    // Falls outside a seven day window.
    insert_event(&db, "page_view", Some("/diensten"), 10)
        .await
        .expect("Failed to insert event");

    let app = test::init_service(App::new().configure(bouwcms::web::analytics::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics/stats?days=7")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let stats: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(stats["days"], 7);
    assert_eq!(stats["totalEvents"], 4);

    let counts = stats["countsByType"].as_array().unwrap();
    assert_eq!(counts[0]["eventType"], "page_view");
    assert_eq!(counts[0]["count"], 3);
    assert_eq!(counts[1]["eventType"], "contact_submit");
    assert_eq!(counts[1]["count"], 1);

    // Events without a page never show up in the page ranking.
    let pages = stats["topPages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["pagePath"], "/diensten");
    assert_eq!(pages[0]["count"], 2);
    assert_eq!(pages[1]["pagePath"], "/over-ons");

    assert_eq!(stats["recentEvents"].as_array().unwrap().len(), 4);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_stats_days_falls_back_to_thirty() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");
    insert_event(&db, "page_view", Some("/projecten"), 10)
        .await
        .expect("Failed to insert event");

    let app = test::init_service(App::new().configure(bouwcms::web::analytics::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics/stats?days=0")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let stats: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(stats["days"], 30);
    assert_eq!(stats["totalEvents"], 1);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_stats_require_admin_session() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::analytics::configure)).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/analytics/stats")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
