use mockall::mock;
use warehouse_engine::{
    db_types::{FulfillmentRequest, Order, StockMovement},
    traits::{FulfillmentManagement, ProcedureFulfillment},
    FulfillmentError,
};

mock! {
    pub WarehouseBackend {}
    impl FulfillmentManagement for WarehouseBackend {
        async fn fulfil_order(&self, request: &FulfillmentRequest) -> Result<i64, FulfillmentError>;
        async fn fetch_stock_movement(&self, id: i64) -> Result<Option<StockMovement>, FulfillmentError>;
        async fn fetch_order(&self, id: i64) -> Result<Option<Order>, FulfillmentError>;
        async fn fetch_stock_movements_for_order(&self, order_id: i64) -> Result<Vec<StockMovement>, FulfillmentError>;
    }
    impl ProcedureFulfillment for WarehouseBackend {
        async fn add_product_via_procedure(&self, request: &FulfillmentRequest) -> Result<Option<i64>, FulfillmentError>;
    }
}
