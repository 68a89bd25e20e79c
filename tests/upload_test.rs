//! Menu image upload

mod common;

use axum::body::Body;
use common::TestApp;
use http::{Request, StatusCode};
use serde_json::json;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_upload(item_id: &str, content_type: &str, bytes: &[u8], session: &str) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"item_id\"\r\n\r\n{item_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"dish.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(http::header::COOKIE, format!("session={session}"))
        .body(Body::from(body))
        .unwrap()
}

async fn seed_item(app: &TestApp, token: &str) -> i64 {
    let body = json!({ "name": "Mains", "display_name": "Mains" });
    let (_, json) = app
        .send_json(app.post_json("/api/menu/categories", &body, Some(token)))
        .await;
    let category = json["data"]["id"].as_i64().unwrap();

    let body = json!({ "name": "Soup", "price": 5.5, "category_id": category });
    let (_, json) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(token)))
        .await;
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn upload_stores_blob_and_records_filename() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let item = seed_item(&app, &token).await;

    let (status, json) = app
        .send_json(multipart_upload(&item.to_string(), "image/png", b"png-bytes", &token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let filename = json["data"]["filename"].as_str().unwrap();
    assert!(filename.starts_with(&format!("menu_{item}_")));
    assert!(filename.ends_with(".png"));
    assert_eq!(
        json["data"]["path"].as_str().unwrap(),
        format!("/static/uploads/{filename}")
    );

    // Blob on disk and reference on the item
    let on_disk = app.tmp.path().join("uploads").join(filename);
    assert_eq!(std::fs::read(&on_disk).unwrap(), b"png-bytes");

    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    assert_eq!(
        json["data"]["categories"][0]["items"][0]["image_path"]
            .as_str()
            .unwrap(),
        filename
    );
}

#[tokio::test]
async fn unsupported_content_type_is_400() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let item = seed_item(&app, &token).await;

    let (status, json) = app
        .send_json(multipart_upload(&item.to_string(), "image/gif", b"gif", &token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn upload_for_unknown_item_is_404() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let (status, _) = app
        .send_json(multipart_upload("4242", "image/png", b"png", &token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_requires_a_session() {
    let app = common::spawn().await;
    let (status, _) = app
        .send_json(multipart_upload("1", "image/png", b"png", "bogus"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn remove_clears_reference_and_deletes_blob() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let item = seed_item(&app, &token).await;

    let (_, json) = app
        .send_json(multipart_upload(&item.to_string(), "image/jpeg", b"jpg", &token))
        .await;
    let filename = json["data"]["filename"].as_str().unwrap().to_string();

    let (status, _) = app
        .send_json(app.delete(&format!("/api/upload?item_id={item}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(!app.tmp.path().join("uploads").join(&filename).exists());
    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    assert!(json["data"]["categories"][0]["items"][0]["image_path"].is_null());
}

#[tokio::test]
async fn remove_without_item_id_is_400() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let (status, _) = app.send_json(app.delete("/api/upload", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
