mod common;

use actix_web::http::header;
use actix_web::{test, App};
use serial_test::serial;

use bouwcms::session::session_cookie;
use common::*;

/// A multipart body with one file part, plus the matching content type.
fn multipart_file(filename: &str, content_type: &str, data: &str) -> (String, String) {
    let boundary = "grensbouwcms";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: {ct}\r\n\r\n{d}\r\n--{b}--\r\n",
        b = boundary,
        f = filename,
        ct = content_type,
        d = data
    );
    (body, format!("multipart/form-data; boundary={}", boundary))
}

#[actix_rt::test]
#[serial]
async fn test_upload_stores_file_and_records_metadata() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    let (body, content_type) = multipart_file("Steiger Foto.JPG", "image/jpeg", "steigerbytes");
    let req = test::TestRequest::post()
        .uri("/api/admin/media/upload")
        .cookie(session_cookie(&admin.id))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["originalName"], "Steiger Foto.JPG");
    assert_eq!(body["mimeType"], "image/jpeg");
    assert_eq!(body["size"], "steigerbytes".len());
    assert_eq!(body["uploadedBy"], admin.id.as_str());

    let filename = body["filename"].as_str().unwrap();
    assert!(
        filename.ends_with(".jpg"),
        "The stored name keeps a lowercased extension: {}",
        filename
    );
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"), "Got url {}", url);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_upload_without_file_part_is_rejected() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    // A form field without a filename is not a file part.
    let boundary = "grensbouwcms";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"omschrijving\"\r\n\r\ntekst\r\n--{b}--\r\n",
        b = boundary
    );
    let req = test::TestRequest::post()
        .uri("/api/admin/media/upload")
        .cookie(session_cookie(&admin.id))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "No file provided");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_media_list_is_newest_first() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    for (name, data) in [("eerste.png", "aaaa"), ("tweede.png", "bbbb")] {
        let (body, content_type) = multipart_file(name, "image/png", data);
        let req = test::TestRequest::post()
            .uri("/api/admin/media/upload")
            .cookie(session_cookie(&admin.id))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/media")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["originalName"], "tweede.png");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_delete_media_removes_the_record() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    let (body, content_type) = multipart_file("sloop.png", "image/png", "sloopbytes");
    let req = test::TestRequest::post()
        .uri("/api/admin/media/upload")
        .cookie(session_cookie(&admin.id))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let uploaded: serde_json::Value = test::read_body_json(resp).await;
    let id = uploaded["id"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/media/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/media/{}", id))
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Media file not found"
    );

    let req = test::TestRequest::get()
        .uri("/api/admin/media")
        .cookie(session_cookie(&admin.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_uploaded_file_is_served_back() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_admin(&db, "beheer@bouwmeesters.nl", "wachtwoord123")
        .await
        .expect("Failed to create admin");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    let data = "keukenrenovatie-fotobytes";
    let (body, content_type) = multipart_file("keuken.jpg", "image/jpeg", data);
    let req = test::TestRequest::post()
        .uri("/api/admin/media/upload")
        .cookie(session_cookie(&admin.id))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let uploaded: serde_json::Value = test::read_body_json(resp).await;
    let url = uploaded["url"].as_str().unwrap().to_owned();

    // The stored bytes come back on the public URL, no session needed.
    let req = test::TestRequest::get().uri(&url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("image/jpeg")
    );
    let served = test::read_body(resp).await;
    assert_eq!(served.to_vec(), data.as_bytes());

    // Range requests yield partial content.
    let req = test::TestRequest::get()
        .uri(&url)
        .insert_header((header::RANGE, "bytes=0-5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 206);
    let partial = test::read_body(resp).await;
    assert_eq!(partial.to_vec(), b"keuken");

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}

#[actix_rt::test]
#[serial]
async fn test_serving_unknown_upload_is_404() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let app = test::init_service(App::new().configure(bouwcms::web::media::configure)).await;

    let req = test::TestRequest::get()
        .uri("/uploads/bestaat-niet.jpg")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    cleanup_test_data(&db).await.expect("Failed to cleanup");
}
