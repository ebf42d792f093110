//! Helpers for populating a test database. The fulfillment engine never creates products, warehouses or orders
//! itself, so tests use these to set the scene.
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use wms_common::Money;

use crate::db_types::NewStockMovement;

pub async fn insert_product(pool: &SqlitePool, id: i64, price: Money) {
    sqlx::query("INSERT INTO products (id, name, description, price) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(format!("Product {id}"))
        .bind("")
        .bind(price)
        .execute(pool)
        .await
        .expect("Error inserting product");
}

pub async fn insert_warehouse(pool: &SqlitePool, id: i64) {
    sqlx::query("INSERT INTO warehouses (id, name, address) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("Warehouse {id}"))
        .bind("")
        .execute(pool)
        .await
        .expect("Error inserting warehouse");
}

pub async fn insert_order(pool: &SqlitePool, id: i64, product_id: i64, amount: i64, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO orders (id, product_id, amount, created_at) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(product_id)
        .bind(amount)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("Error inserting order");
}

/// Records a stock movement directly, bypassing the workflow. The order is left untouched.
pub async fn insert_stock_movement(pool: &SqlitePool, movement: NewStockMovement) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO product_warehouse (warehouse_id, product_id, order_id, amount, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
        "#,
    )
    .bind(movement.warehouse_id)
    .bind(movement.product_id)
    .bind(movement.order_id)
    .bind(movement.amount)
    .bind(movement.price)
    .bind(movement.created_at)
    .fetch_one(pool)
    .await
    .expect("Error inserting stock movement")
}

pub async fn count_stock_movements(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_warehouse")
        .fetch_one(pool)
        .await
        .expect("Error counting stock movements")
}
