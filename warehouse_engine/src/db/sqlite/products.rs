use sqlx::SqliteConnection;

use crate::{db_types::Product, FulfillmentError};

pub async fn fetch_product(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, FulfillmentError> {
    let product = sqlx::query_as::<_, Product>("SELECT id, name, description, price FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}
