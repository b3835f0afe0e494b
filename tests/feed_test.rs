mod common;

use actix_web::{test, App};
use sea_orm::ActiveModelTrait;
use serial_test::serial;

use bouwcms::web::feed::clear_feed_cache;
use common::*;

#[actix_rt::test]
#[serial]
async fn test_rss_feed_lists_published_articles_only() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();

    create_test_article(&db, "Gepubliceerd Nieuwsbericht", "Published News", true)
        .await
        .expect("Failed to create article");
    create_test_article(&db, "Geheim Concept", "Secret Draft", false)
        .await
        .expect("Failed to create article");

    let app = test::init_service(App::new().configure(bouwcms::web::feed::configure)).await;

    let req = test::TestRequest::get().uri("/feed.rss").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "RSS feed should be served");

    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "application/rss+xml; charset=utf-8");

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<rss"), "Body should be an RSS document");
    assert!(
        body.contains("Gepubliceerd Nieuwsbericht"),
        "Published article should be in the feed"
    );
    assert!(
        !body.contains("Geheim Concept"),
        "Drafts must not leak into the feed"
    );
    assert!(
        body.contains("/blog/gepubliceerd-nieuwsbericht"),
        "Items should link to the public article route"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();
}

#[actix_rt::test]
#[serial]
async fn test_atom_feed_is_served_with_entries() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();

    create_test_article(&db, "Atoombericht", "Atom Post", true)
        .await
        .expect("Failed to create article");

    let app = test::init_service(App::new().configure(bouwcms::web::feed::configure)).await;

    let req = test::TestRequest::get().uri("/feed.atom").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "Atom feed should be served");

    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "application/atom+xml; charset=utf-8");

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<feed"), "Body should be an Atom document");
    assert!(body.contains("Atoombericht"));
    assert!(
        body.contains("<content type=\"html\""),
        "Entries should carry the full article body"
    );

    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();
}

#[actix_rt::test]
#[serial]
async fn test_feed_heading_follows_blog_settings() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();

    let mut settings = bouwcms::seed_data::default_blog_settings();
    settings.title_nl = Some("Kennisbank".to_owned());
    settings.subtitle_nl = Some("Vakkennis uit de bouwpraktijk".to_owned());
    bouwcms::seed_data::blog_settings_row(settings)
        .insert(&db)
        .await
        .expect("Failed to store blog settings");

    let app = test::init_service(App::new().configure(bouwcms::web::feed::configure)).await;

    let req = test::TestRequest::get().uri("/feed.rss").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Kennisbank"));
    assert!(body.contains("Vakkennis uit de bouwpraktijk"));

    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();
}

#[actix_rt::test]
#[serial]
async fn test_feed_serves_from_cache_until_cleared() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();

    create_test_article(&db, "Eerste Bericht", "First Post", true)
        .await
        .expect("Failed to create article");

    let app = test::init_service(App::new().configure(bouwcms::web::feed::configure)).await;

    let req = test::TestRequest::get().uri("/feed.rss").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Eerste Bericht"));

    // A row inserted behind the cache's back stays invisible...
    create_test_article(&db, "Tweede Bericht", "Second Post", true)
        .await
        .expect("Failed to create article");

    let req = test::TestRequest::get().uri("/feed.rss").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(
        !body.contains("Tweede Bericht"),
        "The cached feed is served within the TTL window"
    );

    // ...until the cache is dropped, as blog mutations do.
    clear_feed_cache();

    let req = test::TestRequest::get().uri("/feed.rss").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Tweede Bericht"));

    cleanup_test_data(&db).await.expect("Failed to cleanup");
    clear_feed_cache();
}
