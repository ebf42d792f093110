pub mod db;

pub mod procedure;
pub mod queries;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::FulfillmentError;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<PgPool, FulfillmentError> {
    let pool = PgPoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
