use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use warehouse_engine::{db_types::StockMovement, FulfillmentApi, FulfillmentError};
use wms_common::Money;

use super::{
    helpers::{get_request, post_request},
    mocks::MockWarehouseBackend,
};
use crate::{
    routes::{health, FulfilOrderRoute, FulfilOrderViaProcedureRoute, StockMovementRoute},
    server::{json_config, path_config},
};

const DELIVERY: &str = r#"{"idProduct": 1, "idWarehouse": 2, "amount": 3, "createdAt": "2024-06-01T12:00:00Z"}"#;

fn configure(backend: MockWarehouseBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(FulfillmentApi::new(backend)))
            .app_data(json_config())
            .app_data(path_config())
            .service(health)
            .service(FulfilOrderViaProcedureRoute::<MockWarehouseBackend>::new())
            .service(FulfilOrderRoute::<MockWarehouseBackend>::new())
            .service(StockMovementRoute::<MockWarehouseBackend>::new());
    }
}

fn error_message(body: &str) -> String {
    let json: Value = serde_json::from_str(body).expect("Error body is not JSON");
    json["error"].as_str().expect("No error message in body").to_string()
}

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init().ok();
    let res = get_request("/health", configure(MockWarehouseBackend::new())).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn fulfil_order() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend
        .expect_fulfil_order()
        .withf(|r| {
            r.product_id == 1 &&
                r.warehouse_id == 2 &&
                r.amount == 3 &&
                r.created_at == Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
        })
        .times(1)
        .returning(|_| Ok(17));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location.as_deref(), Some("/warehouse/17"));
    assert_eq!(res.body, r#"{"id":17}"#);
}

#[actix_web::test]
async fn timestamp_without_offset_is_utc() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend
        .expect_fulfil_order()
        .withf(|r| r.created_at == Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        .times(1)
        .returning(|_| Ok(18));
    let body = r#"{"idProduct": 1, "idWarehouse": 2, "amount": 3, "createdAt": "2024-06-01T12:00:00"}"#;
    let res = post_request("/warehouse", body, configure(backend)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location.as_deref(), Some("/warehouse/18"));
}

#[actix_web::test]
async fn invalid_amount_is_rejected_before_the_database() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().never();
    backend.expect_add_product_via_procedure().never();
    let body = r#"{"idProduct": 1, "idWarehouse": 2, "amount": 0, "createdAt": "2024-06-01T12:00:00Z"}"#;
    let res = post_request("/warehouse", body, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res.body), "Amount must be greater than zero, but was 0");
}

#[actix_web::test]
async fn invalid_amount_is_rejected_on_the_procedure_path() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_add_product_via_procedure().never();
    let body = r#"{"idProduct": 1, "idWarehouse": 2, "amount": -4, "createdAt": "2024-06-01T12:00:00Z"}"#;
    let res = post_request("/warehouse/procedure", body, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_body() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().never();
    let res = post_request("/warehouse", r#"{"idProduct": 1, "amount": 3}"#, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(error_message(&res.body).starts_with("Could not read request body"));
}

#[actix_web::test]
async fn missing_product_and_warehouse() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().times(1).returning(|_| Err(FulfillmentError::ProductNotFound(1)));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(error_message(&res.body).contains("Product #1 does not exist"));

    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().times(1).returning(|_| Err(FulfillmentError::WarehouseNotFound(2)));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(error_message(&res.body).contains("Warehouse #2 does not exist"));
}

#[actix_web::test]
async fn business_rule_violations() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend
        .expect_fulfil_order()
        .times(1)
        .returning(|_| Err(FulfillmentError::NoMatchingOrder { product_id: 1, amount: 3 }));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res.body), "There is no valid order for 3 units of product #1 to fulfil");

    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().times(1).returning(|_| Err(FulfillmentError::OrderAlreadyFulfilled(5)));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res.body), "Order #5 has already been fulfilled");
}

#[actix_web::test]
async fn database_failures_are_internal_errors() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend
        .expect_fulfil_order()
        .times(1)
        .returning(|_| Err(FulfillmentError::DatabaseError("database is locked".into())));
    let res = post_request("/warehouse", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.location.is_none());
}

#[actix_web::test]
async fn fulfil_order_via_procedure() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fulfil_order().never();
    backend.expect_add_product_via_procedure().times(1).returning(|_| Ok(Some(23)));
    let res = post_request("/warehouse/procedure", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location.as_deref(), Some("/warehouse/23"));
    assert_eq!(res.body, r#"{"id":23}"#);
}

#[actix_web::test]
async fn procedure_returning_null() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_add_product_via_procedure().times(1).returning(|_| Ok(None));
    let res = post_request("/warehouse/procedure", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res.body), "The stored procedure did not return a stock movement id");
}

#[actix_web::test]
async fn procedure_errors_are_passed_through() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_add_product_via_procedure().times(1).returning(|_| {
        Err(FulfillmentError::ProcedureRejected("Invalid parameter: there is no order to fulfil".into()))
    });
    let res = post_request("/warehouse/procedure", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&res.body), "Invalid parameter: there is no order to fulfil");
}

#[actix_web::test]
async fn procedure_unsupported() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_add_product_via_procedure().times(1).returning(|_| Err(FulfillmentError::ProcedureUnsupported));
    let res = post_request("/warehouse/procedure", DELIVERY, configure(backend)).await;
    assert_eq!(res.status, StatusCode::NOT_IMPLEMENTED);
}

#[actix_web::test]
async fn fetch_stock_movement() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fetch_stock_movement().withf(|id| *id == 17).times(1).returning(|id| {
        Ok(Some(StockMovement {
            id,
            warehouse_id: 2,
            product_id: 1,
            order_id: 5,
            amount: 3,
            price: Money::from(3000),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
        }))
    });
    let res = get_request("/warehouse/17", configure(backend)).await;
    assert_eq!(res.status, StatusCode::OK);
    let json: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["id"], 17);
    assert_eq!(json["orderId"], 5);
    assert_eq!(json["warehouseId"], 2);
    assert_eq!(json["price"], 3000);
}

#[actix_web::test]
async fn fetch_missing_stock_movement() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockWarehouseBackend::new();
    backend.expect_fetch_stock_movement().times(1).returning(|_| Ok(None));
    let res = get_request("/warehouse/99", configure(backend)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let mut backend = MockWarehouseBackend::new();
    backend.expect_fetch_stock_movement().never();
    let res = get_request("/warehouse/not-a-number", configure(backend)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
