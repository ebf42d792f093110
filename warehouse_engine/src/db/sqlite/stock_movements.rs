use sqlx::SqliteConnection;

use crate::{
    db_types::{NewStockMovement, StockMovement},
    FulfillmentError,
};

/// Inserts a new stock movement using the given connection and returns its id. This is not atomic. Embed this call
/// inside a transaction if you need atomicity, and pass `&mut *tx` as the connection argument.
pub async fn insert_stock_movement(
    movement: NewStockMovement,
    conn: &mut SqliteConnection,
) -> Result<i64, FulfillmentError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO product_warehouse (
                warehouse_id,
                product_id,
                order_id,
                amount,
                price,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id;
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

/// Returns true if any stock movement has been recorded against the order.
pub async fn movement_exists_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<bool, FulfillmentError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM product_warehouse WHERE order_id = $1 LIMIT 1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn fetch_stock_movement(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<StockMovement>, FulfillmentError> {
    let movement = sqlx::query_as::<_, StockMovement>(
        r#"
            SELECT id, warehouse_id, product_id, order_id, amount, price, created_at
            FROM product_warehouse
            WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(movement)
}

pub async fn fetch_movements_for_order(
    order_id: i64,
    conn: &mut SqliteConnection,
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
