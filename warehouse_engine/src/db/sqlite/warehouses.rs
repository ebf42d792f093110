use sqlx::SqliteConnection;

use crate::FulfillmentError;

pub async fn warehouse_exists(id: i64, conn: &mut SqliteConnection) -> Result<bool, FulfillmentError> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM warehouses WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(found.is_some())
}
