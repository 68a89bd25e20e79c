//! Menu catalog: categories, items, the nested read model

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::{Value, json};

async fn create_category(app: &TestApp, token: &str, name: &str, order: i64) -> i64 {
    let body = json!({ "name": name, "display_name": name, "display_order": order });
    let (status, json) = app
        .send_json(app.post_json("/api/menu/categories", &body, Some(token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["id"].as_i64().unwrap()
}

async fn create_item(app: &TestApp, token: &str, category_id: i64, name: &str, price: f64, order: i64) -> i64 {
    let body = json!({
        "name": name,
        "price": price,
        "category_id": category_id,
        "display_order": order,
    });
    let (status, json) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn create_category_then_item_then_list() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let starters = create_category(&app, &token, "Starters", 1).await;
    create_item(&app, &token, starters, "Soup", 5.50, 0).await;

    let (status, json) = app.send_json(app.get("/api/menu", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_items"], 1);

    let categories = json["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Starters");

    let items = categories[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Soup");
    assert_eq!(items[0]["price"], 5.5);
}

#[tokio::test]
async fn duplicate_category_name_is_409() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    create_category(&app, &token, "Starters", 1).await;
    let body = json!({ "name": "Starters", "display_name": "Other" });
    let (status, json) = app
        .send_json(app.post_json("/api/menu/categories", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn category_uniqueness_is_case_sensitive() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    create_category(&app, &token, "Starters", 1).await;
    // Exact match only: a case-folded duplicate is allowed
    let body = json!({ "name": "starters", "display_name": "Starters" });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/categories", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn category_without_display_name_is_400() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let body = json!({ "name": "Starters" });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/categories", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalog_ordering_is_stable() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    // Categories inserted with orders [2, 1]; items within each category
    // inserted as [b, a] and [d, c] on the same display order
    let second = create_category(&app, &token, "Second", 2).await;
    let first = create_category(&app, &token, "First", 1).await;
    create_item(&app, &token, second, "b", 1.0, 0).await;
    create_item(&app, &token, second, "a", 1.0, 0).await;
    create_item(&app, &token, first, "d", 1.0, 0).await;
    create_item(&app, &token, first, "c", 1.0, 0).await;

    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    let categories = json["data"]["categories"].as_array().unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["First", "Second"]);

    let item_names = |c: &Value| -> Vec<String> {
        c["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(item_names(&categories[0]), ["c", "d"]);
    assert_eq!(item_names(&categories[1]), ["a", "b"]);
}

#[tokio::test]
async fn item_display_order_dominates_name() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let cat = create_category(&app, &token, "Mains", 1).await;
    create_item(&app, &token, cat, "Alpha", 1.0, 5).await;
    create_item(&app, &token, cat, "Zeta", 1.0, 1).await;

    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    let items = json["data"]["categories"][0]["items"].as_array().unwrap();
    assert_eq!(items[0]["name"], "Zeta");
    assert_eq!(items[1]["name"], "Alpha");
}

#[tokio::test]
async fn item_for_unknown_category_is_404() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let body = json!({ "name": "Soup", "price": 5.5, "category_id": 999 });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_with_missing_or_invalid_price_is_400() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let cat = create_category(&app, &token, "Mains", 1).await;

    let body = json!({ "name": "Soup", "category_id": cat });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "name": "Soup", "price": -1.0, "category_id": cat });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_flags_roundtrip() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let cat = create_category(&app, &token, "Mains", 1).await;

    let body = json!({
        "name": "Chili",
        "price": 9.9,
        "category_id": cat,
        "spicy": true,
        "vegan": true,
    });
    let (status, json) = app
        .send_json(app.post_json("/api/menu/items", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["spicy"], true);
    assert_eq!(json["data"]["vegan"], true);
    assert_eq!(json["data"]["vegetarian"], false);
}

#[tokio::test]
async fn update_item_is_full_field() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let cat = create_category(&app, &token, "Mains", 1).await;
    let item = create_item(&app, &token, cat, "Soup", 5.5, 0).await;

    // Flags not resent are reset: a full-field update, not a patch
    let body = json!({ "id": item, "name": "Goulash", "price": 7.0, "spicy": true });
    let (status, _) = app
        .send_json(app.put_json("/api/menu/update", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    let updated = &json["data"]["categories"][0]["items"][0];
    assert_eq!(updated["name"], "Goulash");
    assert_eq!(updated["price"], 7.0);
    assert_eq!(updated["spicy"], true);

    let body = json!({ "id": item, "name": "Goulash", "price": 7.0 });
    app.send_json(app.put_json("/api/menu/update", &body, Some(&token)))
        .await;
    let (_, json) = app.send_json(app.get("/api/menu", None)).await;
    assert_eq!(json["data"]["categories"][0]["items"][0]["spicy"], false);
}

#[tokio::test]
async fn update_missing_fields_is_400_and_unknown_id_is_404() {
    let app = common::spawn().await;
    let token = app.login_default().await;

    let body = json!({ "id": 1, "name": "x" });
    let (status, _) = app
        .send_json(app.put_json("/api/menu/update", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = json!({ "id": 4242, "name": "x", "price": 1.0 });
    let (status, _) = app
        .send_json(app.put_json("/api/menu/update", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_item_is_idempotent() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let cat = create_category(&app, &token, "Mains", 1).await;
    let item = create_item(&app, &token, cat, "Soup", 5.5, 0).await;

    let (status, _) = app
        .send_json(app.delete(&format!("/api/menu/update?id={item}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Absent row: still a success
    let (status, _) = app
        .send_json(app.delete(&format!("/api/menu/update?id={item}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_category_cascades_to_items() {
    let app = common::spawn().await;
    let token = app.login_default().await;
    let cat = create_category(&app, &token, "Mains", 1).await;
    create_item(&app, &token, cat, "Soup", 5.5, 0).await;
    create_item(&app, &token, cat, "Stew", 8.0, 1).await;

    let (status, _) = app
        .send_json(app.delete(&format!("/api/menu/categories?id={cat}"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
        .fetch_one(&app.state.pool)
        .await
        .unwrap();
    assert_eq!(items, 0);
}

#[tokio::test]
async fn catalog_mutations_require_a_session() {
    let app = common::spawn().await;

    let body = json!({ "name": "Starters", "display_name": "Starters" });
    let (status, _) = app
        .send_json(app.post_json("/api/menu/categories", &body, None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send_json(app.get("/api/menu", None)).await;
    assert_eq!(status, StatusCode::OK);
}
