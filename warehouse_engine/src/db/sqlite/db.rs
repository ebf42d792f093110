use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::SqlitePool;

use super::{new_pool, orders, products, stock_movements, warehouses};
use crate::{
    db::traits::{FulfillmentManagement, ProcedureFulfillment},
    db_types::{FulfillmentRequest, NewStockMovement, Order, StockMovement},
    FulfillmentError,
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl FulfillmentManagement for SqliteDatabase {
    async fn fulfil_order(&self, request: &FulfillmentRequest) -> Result<i64, FulfillmentError> {
        // Dropping `tx` without committing rolls back every write below, so each `?` leaves the database untouched.
        let mut tx = self.pool.begin().await?;
        let product = products::fetch_product(request.product_id, &mut tx)
            .await?
            .ok_or(FulfillmentError::ProductNotFound(request.product_id))?;
        if !warehouses::warehouse_exists(request.warehouse_id, &mut tx).await? {
            return Err(FulfillmentError::WarehouseNotFound(request.warehouse_id));
        }
        let order = orders::latest_order_before(request.product_id, request.amount, request.created_at, &mut tx)
            .await?
            .ok_or(FulfillmentError::NoMatchingOrder { product_id: request.product_id, amount: request.amount })?;
        if stock_movements::movement_exists_for_order(order.id, &mut tx).await? {
            debug!("🗃️ Order #{} already has a stock movement. Rolling back.", order.id);
            return Err(FulfillmentError::OrderAlreadyFulfilled(order.id));
        }
        let now = Utc::now();
        orders::mark_fulfilled(order.id, now, &mut tx).await?;
        let price = product
            .price
            .checked_mul(request.amount)
            .ok_or(FulfillmentError::PriceOverflow { unit_price: product.price, amount: request.amount })?;
        let movement = NewStockMovement {
            warehouse_id: request.warehouse_id,
            product_id: request.product_id,
            order_id: order.id,
            amount: request.amount,
            price,
            created_at: now,
        };
        let id = stock_movements::insert_stock_movement(movement, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} fulfilled by stock movement #{id} ({price})", order.id);
        Ok(id)
    }

    async fn fetch_stock_movement(&self, id: i64) -> Result<Option<StockMovement>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        stock_movements::fetch_stock_movement(id, &mut conn).await
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(id, &mut conn).await
    }

    async fn fetch_stock_movements_for_order(&self, order_id: i64) -> Result<Vec<StockMovement>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        stock_movements::fetch_movements_for_order(order_id, &mut conn).await
    }
}

impl ProcedureFulfillment for SqliteDatabase {
    async fn add_product_via_procedure(&self, request: &FulfillmentRequest) -> Result<Option<i64>, FulfillmentError> {
        warn!("🗃️ Stored procedure requested for [{request}], but SQLite does not support stored procedures");
        Err(FulfillmentError::ProcedureUnsupported)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, FulfillmentError> {
        trace!("Creating new SQLite connection pool");
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the database connection.
    pub async fn close(&mut self) -> Result<(), FulfillmentError> {
        self.pool.close().await;
        Ok(())
    }
}
