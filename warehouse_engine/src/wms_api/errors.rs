use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FulfillmentError {
    #[error("Amount must be greater than zero, but was {0}")]
    InvalidAmount(i64),
    #[error("The total price for {amount} units at {unit_price} overflows")]
    PriceOverflow { unit_price: wms_common::Money, amount: i64 },
    #[error("Product #{0} does not exist")]
    ProductNotFound(i64),
    #[error("Warehouse #{0} does not exist")]
    WarehouseNotFound(i64),
    #[error("There is no valid order for {amount} units of product #{product_id} to fulfil")]
    NoMatchingOrder { product_id: i64, amount: i64 },
    #[error("Order #{0} has already been fulfilled")]
    OrderAlreadyFulfilled(i64),
    #[error("{0}")]
    ProcedureRejected(String),
    #[error("The stored procedure did not return a stock movement id")]
    ProcedureReturnedNothing,
    #[error("The database backend does not support stored procedures")]
    ProcedureUnsupported,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for FulfillmentError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl FulfillmentError {
    /// True for failures caused by the request itself or the state of the data, rather than the infrastructure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DatabaseError(_) | Self::ProcedureUnsupported)
    }
}
