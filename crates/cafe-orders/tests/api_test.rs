//! HTTP routes driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use cafe_orders::config::Config;
use cafe_orders::lifecycle::OrderSystem;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (OrderSystem, Router) {
    let config = Config::from_lookup(|name| match name {
        "BCRYPT_COST" => Some("4".into()),
        _ => None,
    })
    .unwrap();
    let system = OrderSystem::start(&config).unwrap();
    let router = system.router();
    (system, router)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn cart(items: Value) -> Value {
    json!({
        "items": items,
        "totalAmount": 21.5,
        "deliveryAddress": "Yakkasaroy 3",
        "latitude": 41.28,
        "longitude": 69.25,
        "phone": "+998991234567",
        "notes": "",
        "paymentMethod": "cash"
    })
}

async fn place(app: &Router) -> u64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/orders",
        Some(cart(json!([
            { "id": 4, "quantity": 2, "price": 6.5 },
            { "menuItemId": 9, "quantity": 1, "price": 8.5 }
        ]))),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["order"]["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_create_and_list_orders() {
    let (_system, app) = app();

    let id = place(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], json!(id));
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(orders[0]["notes"], Value::Null);
    assert_eq!(orders[0]["user_name"], Value::Null);

    let items = orders[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["menu_item_id"], 4);
    assert_eq!(items[1]["menu_item_id"], 9);
    assert_eq!(items[1]["quantity"], 1);
}

#[tokio::test]
async fn test_create_order_rejects_bad_input() {
    let (_system, app) = app();

    let (status, body) = send(&app, Method::POST, "/api/orders", Some(cart(json!([])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Order items are required" }));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut for_stranger = cart(json!([{ "id": 1, "quantity": 1, "price": 21.5 }]));
    for_stranger["userId"] = json!(404);
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(for_stranger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown customer: 404");

    let (_, body) = send(&app, Method::GET, "/api/orders", None).await;
    assert!(body["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_status_codes() {
    let (_system, app) = app();
    let id = place(&app).await;
    let uri = format!("/api/orders/{id}");

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "status": "shipped" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "status": "delivered" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/orders/9999",
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "status": "confirmed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["status"], "confirmed");

    let (status, _) = send(&app, Method::PATCH, "/api/orders/abc", Some(json!({ "status": "confirmed" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_filter_query() {
    let (_system, app) = app();
    place(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/orders?userId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["orders"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::GET, "/api/orders?userId=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_login_and_list_users() {
    let (_system, app) = app();
    let form = json!({
        "email": "Nodira@Example.uz",
        "password": "samsa-and-tea",
        "name": "Nodira",
        "phone": "+998900001122"
    });

    let (status, body) = send(&app, Method::POST, "/api/auth/register", Some(form.clone())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "nodira@example.uz");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(&app, Method::POST, "/api/auth/register", Some(form)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "User already exists" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "x@example.uz" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email, password and name are required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "nodira@example.uz", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "NODIRA@example.uz", "password": "samsa-and-tea" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Nodira");

    let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");

    let (status, body) = send(&app, Method::GET, "/api/admin/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Nodira");
}

#[tokio::test]
async fn test_orders_carry_the_owner_name() {
    let (_system, app) = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "timur@example.uz", "password": "pw", "name": "Timur" })),
    )
    .await;
    let user_id = body["user"]["id"].as_u64().unwrap();

    let mut order = cart(json!([{ "id": 2, "quantity": 1, "price": 21.5 }]));
    order["userId"] = json!(user_id);
    let (status, _) = send(&app, Method::POST, "/api/orders", Some(order)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("/api/orders?userId={user_id}"), None).await;
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["user_name"], "Timur");
    assert_eq!(orders[0]["user_email"], "timur@example.uz");
}
