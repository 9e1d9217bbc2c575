//! Book intake over HTTP against in-memory stores.

use reqwest::StatusCode;
use serde_json::{Value, json};

use bookstore_integration_tests::TestServer;

fn book() -> Value {
    json!({
        "ISBN": "111",
        "title": "T",
        "Author": "A",
        "description": "D",
        "genre": "G",
        "price": 19.99,
        "quantity": 5
    })
}

async fn create(server: &TestServer, body: &Value) -> reqwest::Response {
    server
        .client
        .post(server.url("/books"))
        .json(body)
        .send()
        .await
        .unwrap()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_book() {
    let server = TestServer::in_memory().await;

    let response = create(&server, &book()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers()["location"].to_str().unwrap(),
        "/books/111"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ISBN"], "111");
    assert_eq!(body["price"], 19.99);
}

#[tokio::test]
async fn test_create_negative_price_is_rejected() {
    let server = TestServer::in_memory().await;

    let mut body = book();
    body["price"] = json!(-1);
    let response = create(&server, &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = response.json().await.unwrap();
    assert_eq!(error["statusCode"], 400);
    assert_eq!(error["error"], "Bad Request");
    assert!(error["message"].is_array());

    let lookup = server
        .client
        .get(server.url("/books/111"))
        .send()
        .await
        .unwrap();
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let server = TestServer::in_memory().await;

    let response = create(&server, &json!({"ISBN": "111", "price": 1.234})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = response.json().await.unwrap();
    let messages = error["message"].as_array().unwrap();
    assert!(messages.len() >= 6, "{messages:?}");
}

#[tokio::test]
async fn test_create_price_over_limit_is_rejected() {
    let server = TestServer::in_memory().await;

    let mut body = book();
    body["price"] = json!(10_000_000_000_u64);
    let response = create(&server, &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = response.json().await.unwrap();
    assert_eq!(
        error["message"],
        json!(["price must not be greater than 9999999999.99"])
    );
}

#[tokio::test]
async fn test_create_duplicate_isbn_is_conflict() {
    let server = TestServer::in_memory().await;

    assert_eq!(create(&server, &book()).await.status(), StatusCode::CREATED);
    let response = create(&server, &book()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json().await.unwrap();
    assert_eq!(error["message"], "This ISBN already exists in the system.");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = TestServer::in_memory().await;

    let response = server
        .client
        .post(server.url("/books"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_price_keeps_other_fields() {
    let server = TestServer::in_memory().await;
    create(&server, &book()).await;

    let response = server
        .client
        .put(server.url("/books/111"))
        .json(&json!({"price": 25.00}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let found: Value = server
        .client
        .get(server.url("/books/isbn/111"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut expected = book();
    expected["price"] = json!(25.0);
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_update_invalid_price_changes_nothing() {
    let server = TestServer::in_memory().await;
    create(&server, &book()).await;

    let response = server
        .client
        .put(server.url("/books/111"))
        .json(&json!({"title": "New", "price": "abc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let found: Value = server
        .client
        .get(server.url("/books/111"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found, book());
}

#[tokio::test]
async fn test_update_null_title_is_rejected() {
    let server = TestServer::in_memory().await;
    create(&server, &book()).await;

    let response = server
        .client
        .put(server.url("/books/111"))
        .json(&json!({"title": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = response.json().await.unwrap();
    assert_eq!(error["message"], json!(["title should not be empty"]));
}

#[tokio::test]
async fn test_update_unknown_isbn_is_not_found() {
    let server = TestServer::in_memory().await;

    let response = server
        .client
        .put(server.url("/books/999"))
        .json(&json!({"price": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: Value = response.json().await.unwrap();
    assert_eq!(error["message"], "Book not found");
}

#[tokio::test]
async fn test_update_cannot_move_isbn() {
    let server = TestServer::in_memory().await;
    create(&server, &book()).await;

    let response = server
        .client
        .put(server.url("/books/111"))
        .json(&json!({"ISBN": "222"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
