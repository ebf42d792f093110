pub mod db;

pub mod orders;
pub mod products;
pub mod stock_movements;
pub mod warehouses;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::FulfillmentError;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, FulfillmentError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
