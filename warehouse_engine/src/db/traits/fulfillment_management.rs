use crate::{
    db_types::{FulfillmentRequest, Order, StockMovement},
    wms_api::errors::FulfillmentError,
};

/// The `FulfillmentManagement` trait defines the order fulfillment workflow and its supporting queries.
#[allow(async_fn_in_trait)]
pub trait FulfillmentManagement {
    /// Takes a delivery request, and in a single atomic transaction,
    /// * checks that the product and warehouse exist,
    /// * finds the most recent order for the product and amount that was created before `request.created_at`,
    /// * checks that no stock movement has been recorded for that order yet,
    /// * marks the order as fulfilled,
    /// * records a stock movement for the order, priced at the product's unit price × amount.
    ///
    /// Returns the id of the new stock movement. If any step fails, nothing is written.
    async fn fulfil_order(&self, request: &FulfillmentRequest) -> Result<i64, FulfillmentError>;

    /// Fetches the stock movement with the given id, or `None` if it does not exist.
    async fn fetch_stock_movement(&self, id: i64) -> Result<Option<StockMovement>, FulfillmentError>;

    /// Fetches the order with the given id, or `None` if it does not exist.
    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, FulfillmentError>;

    /// Fetches all stock movements recorded against the given order, oldest first.
    async fn fetch_stock_movements_for_order(&self, order_id: i64) -> Result<Vec<StockMovement>, FulfillmentError>;
}
