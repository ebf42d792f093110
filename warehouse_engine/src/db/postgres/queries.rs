//! The individual steps of the fulfillment workflow, expressed against a Postgres connection. None of these are atomic
//! on their own. Call them on `&mut *tx` to run them inside a transaction.
use chrono::{DateTime, Utc};
use log::trace;
use sqlx::PgConnection;

use crate::{
    db_types::{NewStockMovement, Order, Product, StockMovement},
    FulfillmentError,
};

pub async fn fetch_product(id: i64, conn: &mut PgConnection) -> Result<Option<Product>, FulfillmentError> {
    let product = sqlx::query_as::<_, Product>("SELECT id, name, description, price FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

pub async fn warehouse_exists(id: i64, conn: &mut PgConnection) -> Result<bool, FulfillmentError> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM warehouses WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(found.is_some())
}

/// Returns the most recently created order for `amount` units of the product, created strictly before `before`.
/// Rows tied on `created_at` come back in whatever order Postgres produces them.
pub async fn latest_order_before(
    product_id: i64,
    amount: i64,
    before: DateTime<Utc>,
    conn: &mut PgConnection,
) -> Result<Option<Order>, FulfillmentError> {
    let order = sqlx::query_as::<_, Order>(
        r#"
            SELECT id, product_id, amount, created_at, fulfilled_at
            FROM orders
            WHERE product_id = $1 AND amount = $2 AND created_at < $3
            ORDER BY created_at DESC
            LIMIT 1
        "#,
    )
    .bind(product_id)
    .bind(amount)
    .bind(before)
    .fetch_optional(conn)
    .await?;
    trace!("🗃️ Latest order for {amount} x product #{product_id} before {before}: {order:?}");
    Ok(order)
}

pub async fn movement_exists_for_order(order_id: i64, conn: &mut PgConnection) -> Result<bool, FulfillmentError> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM product_warehouse WHERE order_id = $1)")
        .bind(order_id)
        .fetch_one(conn)
        .await?;
    Ok(found)
}

pub async fn mark_fulfilled(
    id: i64,
    fulfilled_at: DateTime<Utc>,
    conn: &mut PgConnection,
) -> Result<(), FulfillmentError> {
    let result = sqlx::query("UPDATE orders SET fulfilled_at = $1 WHERE id = $2")
        .bind(fulfilled_at)
        .bind(id)
        .execute(conn)
        .await?;
    trace!("🗃️ Order #{id} marked as fulfilled. {} rows affected", result.rows_affected());
    Ok(())
}

pub async fn insert_stock_movement(
    movement: NewStockMovement,
    conn: &mut PgConnection,
) -> Result<i64, FulfillmentError> {
    let id = sqlx::query_scalar::<_, i64>(
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
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn fetch_order(id: i64, conn: &mut PgConnection) -> Result<Option<Order>, FulfillmentError> {
    let order =
        sqlx::query_as::<_, Order>("SELECT id, product_id, amount, created_at, fulfilled_at FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(order)
}

pub async fn fetch_stock_movement(id: i64, conn: &mut PgConnection) -> Result<Option<StockMovement>, FulfillmentError> {
    let movement = sqlx::query_as::<_, StockMovement>(
        "SELECT id, warehouse_id, product_id, order_id, amount, price, created_at FROM product_warehouse WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(movement)
}

pub async fn fetch_movements_for_order(
    order_id: i64,
    conn: &mut PgConnection,
) -> Result<Vec<StockMovement>, FulfillmentError> {
    let movements = sqlx::query_as::<_, StockMovement>(
        r#"
            SELECT id, warehouse_id, product_id, order_id, amount, price, created_at
            FROM product_warehouse
            WHERE order_id = $1
            ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(order_id)
    .fetch_all(conn)
    .await?;
    Ok(movements)
}
