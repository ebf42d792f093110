use crate::{db_types::FulfillmentRequest, wms_api::errors::FulfillmentError};

/// Delegates the fulfillment workflow to the `add_product_to_warehouse` stored procedure.
#[allow(async_fn_in_trait)]
pub trait ProcedureFulfillment {
    /// Calls the stored procedure and returns the scalar it produces: the new stock movement id, or `None` if the
    /// procedure returned nothing.
    ///
    /// Errors raised explicitly by the procedure are returned as [`FulfillmentError::ProcedureRejected`] carrying the
    /// database's message. Every other database failure is a [`FulfillmentError::DatabaseError`].
    async fn add_product_via_procedure(&self, request: &FulfillmentRequest) -> Result<Option<i64>, FulfillmentError>;
}
