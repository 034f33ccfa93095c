// Endpoint tests for /api/products

#[path = "../helpers/mod.rs"]
#[macro_use]
mod helpers;

use actix_web::test;
use serde_json::{json, Value};

use helpers::*;

#[actix_web::test]
async fn test_product_crud() {
    let state = TestState::new();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(TestDataFactory::product_payload("Consulting", 10, 2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Consulting");
    assert_eq!(created["unit"], "hour");
    assert_eq!(created["currency"], "USD");
    assert_eq!(created["is_active"], true);
    assert_eq!(created["low_stock"], false);
    assert_decimal(&created, "price", "120");
    assert_decimal(&created, "tax_rate", "20");
    assert!(created.get("user_id").is_none());

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", id))
        .set_json(json!({
            "name": "Consulting (senior)",
            "price": "150",
            "stock": 1,
            "min_stock": 2
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Consulting (senior)");
    assert_decimal(&updated, "price", "150");
    // unit is kept when the update omits it
    assert_eq!(updated["unit"], "hour");
    assert_eq!(updated["low_stock"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["low_stock"], true);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", id))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["message"], "Product deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_error_code(&body, 404);
}

#[actix_web::test]
async fn test_list_is_newest_first_with_low_stock_flags() {
    let state = TestState::new();
    let app = test_app!(state);

    for (name, stock, min_stock) in [("Plenty", 50, 5), ("Scarce", 3, 3)] {
        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(TestDataFactory::product_payload(name, stock, min_stock))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let listed = listed.as_array().unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["name"], "Scarce");
    assert_eq!(listed[0]["low_stock"], true);
    assert_eq!(listed[1]["name"], "Plenty");
    assert_eq!(listed[1]["low_stock"], false);
}

#[actix_web::test]
async fn test_invalid_products_rejected() {
    let state = TestState::new();
    let app = test_app!(state);

    let cases = vec![
        json!({ "name": "" }),
        json!({ "name": "Negative", "price": "-1" }),
        json!({ "name": "Negative cost", "cost": "-0.01" }),
        json!({ "name": "Taxed", "tax_rate": "1000" }),
        json!({ "name": "Stock", "stock": -1 }),
    ];

    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "payload: {}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_error_code(&body, 400);
    }
}

#[actix_web::test]
async fn test_products_are_tenant_scoped() {
    let state = TestState::new();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header((TENANT_HEADER, "tenant-b"))
        .set_json(TestDataFactory::product_payload("Theirs", 1, 0))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "name": "Hijacked" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listed.as_array().unwrap().is_empty());

    // the owner still sees it unchanged
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((TENANT_HEADER, "tenant-b"))
        .to_request();
    let theirs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(theirs["name"], "Theirs");
}
