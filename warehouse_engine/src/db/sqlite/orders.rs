use chrono::{DateTime, Utc};
use log::trace;
use sqlx::SqliteConnection;

use crate::{db_types::Order, FulfillmentError};

/// Returns the most recently created order for `amount` units of the given product that was created strictly before
/// `before`. Fulfilled orders are not excluded here; whether the order can still be fulfilled is decided by the
/// stock movement check.
///
/// When several orders share the latest `created_at`, whichever row SQLite returns first wins.
pub async fn latest_order_before(
    product_id: i64,
    amount: i64,
    before: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, FulfillmentError> {
    let order = sqlx::query_as::<_, Order>(
        r#"
            SELECT id, product_id, amount, created_at, fulfilled_at
            FROM orders
            WHERE product_id = $1 AND amount = $2 AND created_at < $3
            ORDER BY created_at DESC
            LIMIT 1;
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

pub async fn fetch_order(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, FulfillmentError> {
    let order =
        sqlx::query_as::<_, Order>("SELECT id, product_id, amount, created_at, fulfilled_at FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(order)
}

pub(crate) async fn mark_fulfilled(
    id: i64,
    fulfilled_at: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<(), FulfillmentError> {
    let result = sqlx::query("UPDATE orders SET fulfilled_at = $1 WHERE id = $2")
        .bind(fulfilled_at)
        .bind(id)
        .execute(conn)
        .await?;
    trace!("🗃️ Order #{id} marked as fulfilled. {} rows affected", result.rows_affected());
    Ok(())
}
