//! Order endpoints.

use axum::http::StatusCode;
use serde_json::json;

use shopmock_integration_tests::{ADMIN_TOKEN, TestApp, USER1_TOKEN, USER2_TOKEN, assert_money};

#[tokio::test]
async fn test_place_order() {
    let app = TestApp::seeded();
    let address = json!({ "street": "1 Main St", "city": "Springfield" });

    let resp = app
        .post(
            "/orders",
            Some(USER1_TOKEN),
            &json!({
                "cartItems": [{ "productId": 3, "quantity": 2 }],
                "shippingAddress": address
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({ "orderId": 1, "status": "Processing" }));

    let resp = app.get("/orders/1", Some(USER1_TOKEN)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["orderId"], 1);
    assert_eq!(resp.body["status"], "Processing");
    assert_eq!(resp.body["items"], json!([{ "productId": 3, "quantity": 2 }]));
    assert_money(&resp.body["total"], 39.98);
    assert_eq!(resp.body["shippingAddress"], address);
}

#[tokio::test]
async fn test_order_total_sums_lines() {
    let app = TestApp::seeded();
    let resp = app
        .post(
            "/orders",
            Some(USER1_TOKEN),
            &json!({
                "cartItems": [
                    { "productId": 1, "quantity": 1 },
                    { "productId": 2, "quantity": 2 }
                ],
                "shippingAddress": "1 Main St"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.get("/orders/1", Some(USER1_TOKEN)).await;
    assert_money(&resp.body["total"], 129.97);
    assert_eq!(resp.body["shippingAddress"], "1 Main St");
}

#[tokio::test]
async fn test_order_ids_are_per_account() {
    let app = TestApp::seeded();
    let body = json!({ "cartItems": [{ "productId": 1, "quantity": 1 }] });

    assert_eq!(app.post("/orders", Some(USER1_TOKEN), &body).await.body["orderId"], 1);
    assert_eq!(app.post("/orders", Some(USER1_TOKEN), &body).await.body["orderId"], 2);
    assert_eq!(app.post("/orders", Some(USER2_TOKEN), &body).await.body["orderId"], 1);

    // Each account only sees its own orders.
    let resp = app.get("/orders/2", Some(USER2_TOKEN)).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error(), Some("Order not found"));
}

#[tokio::test]
async fn test_order_with_unknown_product_records_nothing() {
    let app = TestApp::seeded();

    let resp = app
        .post(
            "/orders",
            Some(USER1_TOKEN),
            &json!({
                "cartItems": [
                    { "productId": 1, "quantity": 1 },
                    { "productId": 42, "quantity": 1 }
                ]
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.error(), Some("Product 42 not found"));

    assert_eq!(
        app.get("/orders/1", Some(USER1_TOKEN)).await.status,
        StatusCode::NOT_FOUND
    );
    let body = json!({ "cartItems": [{ "productId": 1, "quantity": 1 }] });
    assert_eq!(app.post("/orders", Some(USER1_TOKEN), &body).await.body["orderId"], 1);
}

#[tokio::test]
async fn test_order_does_not_touch_cart() {
    let app = TestApp::seeded();
    app.post(
        "/cart/add",
        Some(USER1_TOKEN),
        &json!({ "productId": 2, "quantity": 1 }),
    )
    .await;

    app.post(
        "/orders",
        Some(USER1_TOKEN),
        &json!({ "cartItems": [{ "productId": 1, "quantity": 1 }] }),
    )
    .await;

    let resp = app.get("/cart", Some(USER1_TOKEN)).await;
    assert_eq!(resp.body["items"], json!([{ "productId": 2, "quantity": 1 }]));
}

#[tokio::test]
async fn test_order_requires_cart_items() {
    let app = TestApp::seeded();
    let resp = app
        .post("/orders", Some(USER1_TOKEN), &json!({ "shippingAddress": "x" }))
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_order() {
    let app = TestApp::seeded();
    let body = json!({ "cartItems": [{ "productId": 1, "quantity": 1 }] });
    app.post("/orders", Some(USER1_TOKEN), &body).await;

    let resp = app.delete("/orders/1", Some(USER1_TOKEN)).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get("/orders/1", Some(USER1_TOKEN)).await.status,
        StatusCode::NOT_FOUND
    );

    // Deleted ids are not handed out again.
    assert_eq!(app.post("/orders", Some(USER1_TOKEN), &body).await.body["orderId"], 2);
}

#[tokio::test]
async fn test_delete_missing_order_succeeds() {
    let app = TestApp::seeded();
    let resp = app.delete("/orders/77", Some(ADMIN_TOKEN)).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_orders_require_token() {
    let app = TestApp::seeded();
    let body = json!({ "cartItems": [] });

    assert_eq!(
        app.post("/orders", None, &body).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/orders/1", None).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/orders/1", Some("forged_token")).await.status,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        app.delete("/orders/1", None).await.status,
        StatusCode::UNAUTHORIZED
    );
}
