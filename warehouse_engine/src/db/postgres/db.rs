use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::PgPool;

use super::{new_pool, procedure, queries};
use crate::{
    db::traits::{FulfillmentManagement, ProcedureFulfillment},
    db_types::{FulfillmentRequest, NewStockMovement, Order, StockMovement},
    FulfillmentError,
};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl Debug for PostgresDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PostgresDatabase ({:?})", self.pool)
    }
}

impl FulfillmentManagement for PostgresDatabase {
    async fn fulfil_order(&self, request: &FulfillmentRequest) -> Result<i64, FulfillmentError> {
        let mut tx = self.pool.begin().await?;
        let product = queries::fetch_product(request.product_id, &mut tx)
            .await?
            .ok_or(FulfillmentError::ProductNotFound(request.product_id))?;
        if !queries::warehouse_exists(request.warehouse_id, &mut tx).await? {
            return Err(FulfillmentError::WarehouseNotFound(request.warehouse_id));
        }
        let order = queries::latest_order_before(request.product_id, request.amount, request.created_at, &mut tx)
            .await?
            .ok_or(FulfillmentError::NoMatchingOrder { product_id: request.product_id, amount: request.amount })?;
        if queries::movement_exists_for_order(order.id, &mut tx).await? {
            debug!("🗃️ Order #{} already has a stock movement. Rolling back.", order.id);
            return Err(FulfillmentError::OrderAlreadyFulfilled(order.id));
        }
        let now = Utc::now();
        queries::mark_fulfilled(order.id, now, &mut tx).await?;
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
        let id = queries::insert_stock_movement(movement, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order #{} fulfilled by stock movement #{id} ({price})", order.id);
        Ok(id)
    }

    async fn fetch_stock_movement(&self, id: i64) -> Result<Option<StockMovement>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        queries::fetch_stock_movement(id, &mut conn).await
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        queries::fetch_order(id, &mut conn).await
    }

    async fn fetch_stock_movements_for_order(&self, order_id: i64) -> Result<Vec<StockMovement>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        queries::fetch_movements_for_order(order_id, &mut conn).await
    }
}

impl ProcedureFulfillment for PostgresDatabase {
    async fn add_product_via_procedure(&self, request: &FulfillmentRequest) -> Result<Option<i64>, FulfillmentError> {
        let mut conn = self.pool.acquire().await?;
        procedure::add_product_to_warehouse(request, &mut conn).await
    }
}

impl PostgresDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, FulfillmentError> {
        trace!("Creating new Postgres connection pool");
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&mut self) -> Result<(), FulfillmentError> {
        self.pool.close().await;
        Ok(())
    }
}
