//! Cart endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use shopmock_integration_tests::{ADMIN_TOKEN, TestApp, USER1_TOKEN, USER2_TOKEN, assert_money};

#[tokio::test]
async fn test_empty_cart() {
    let app = TestApp::seeded();
    let resp = app.get("/cart", Some(USER1_TOKEN)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["items"], json!([]));
    assert_money(&resp.body["total"], 0.0);
}

#[tokio::test]
async fn test_add_to_cart() {
    let app = TestApp::seeded();

    let resp = app
        .post(
            "/cart/add",
            Some(USER1_TOKEN),
            &json!({ "productId": 1, "quantity": 2 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({ "message": "Product added to cart." }));

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([{ "productId": 1, "quantity": 2 }]));
    assert_money(&resp.body["total"], 59.98);
}

#[tokio::test]
async fn test_add_same_product_twice_keeps_two_lines() {
    let app = TestApp::seeded();
    let line = json!({ "productId": 3, "quantity": 1 });

    app.post("/cart/add", Some(USER1_TOKEN), &line).await;
    app.post("/cart/add", Some(USER1_TOKEN), &line).await;

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"].as_array().unwrap().len(), 2);
    assert_money(&resp.body["total"], 39.98);
}

#[tokio::test]
async fn test_add_does_not_touch_stock() {
    let app = TestApp::seeded();
    app.post(
        "/cart/add",
        Some(USER1_TOKEN),
        &json!({ "productId": 2, "quantity": 5 }),
    )
    .await;

    assert_eq!(app.get("/products/2", None).await.body["stock"], 50);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let app = TestApp::seeded();

    let resp = app
        .post(
            "/cart/add",
            Some(USER1_TOKEN),
            &json!({ "productId": 99, "quantity": 1 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error(), Some("Product not found"));

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([]));
}

#[tokio::test]
async fn test_add_malformed_line() {
    let app = TestApp::seeded();

    for body in [
        json!({ "productId": 1 }),
        json!({ "productId": 1, "quantity": -1 }),
        json!({ "productId": "one", "quantity": 1 }),
    ] {
        let resp = app.post("/cart/add", Some(USER1_TOKEN), &body).await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    }
}

#[tokio::test]
async fn test_carts_are_per_account() {
    let app = TestApp::seeded();
    app.post(
        "/cart/add",
        Some(USER1_TOKEN),
        &json!({ "productId": 1, "quantity": 1 }),
    )
    .await;

    let resp = app.get("/cart", Some(USER2_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([]));
    let resp = app.get("/cart", Some(ADMIN_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([]));
}

#[tokio::test]
async fn test_remove_from_cart() {
    let app = TestApp::seeded();
    for (product, quantity) in [(1, 1), (2, 1), (1, 3)] {
        app.post(
            "/cart/add",
            Some(USER1_TOKEN),
            &json!({ "productId": product, "quantity": quantity }),
        )
        .await;
    }

    let resp = app
        .delete_with("/cart/remove", Some(USER1_TOKEN), &json!({ "productId": 1 }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({ "message": "Product removed from cart." }));

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([{ "productId": 2, "quantity": 1 }]));
}

/// Removing lines leaves the running total where it was.
#[tokio::test]
async fn test_cart_total_is_stale_after_removal() {
    let app = TestApp::seeded();
    app.post(
        "/cart/add",
        Some(USER1_TOKEN),
        &json!({ "productId": 1, "quantity": 1 }),
    )
    .await;
    app.delete_with("/cart/remove", Some(USER1_TOKEN), &json!({ "productId": 1 }))
        .await;

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([]));
    assert_money(&resp.body["total"], 29.99);
}

#[tokio::test]
async fn test_remove_absent_product_is_noop() {
    let app = TestApp::seeded();
    let resp = app
        .delete_with("/cart/remove", Some(USER1_TOKEN), &json!({ "productId": 3 }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cart_requires_token() {
    let app = TestApp::seeded();

    assert_eq!(app.get("/cart", None).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.post("/cart/add", None, &json!({ "productId": 1, "quantity": 1 }))
            .await
            .status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/cart", Some("nobody_token")).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_remove_without_token_keeps_cart() {
    let app = TestApp::seeded();
    app.post(
        "/cart/add",
        Some(USER1_TOKEN),
        &json!({ "productId": 1, "quantity": 1 }),
    )
    .await;

    let resp = app
        .delete_with("/cart/remove", None, &json!({ "productId": 1 }))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.error(), Some("Missing or invalid token"));

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([{ "productId": 1, "quantity": 1 }]));
}
