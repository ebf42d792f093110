use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{FulfillmentRequest, Order, StockMovement},
    traits::{FulfillmentManagement, ProcedureFulfillment},
    FulfillmentError,
};

/// `FulfillmentApi` is the primary API for fulfilling orders in response to stock deliveries.
///
/// Requests are validated before the backend is touched, so a request that can never succeed (e.g. a zero amount)
/// costs no database round trip.
pub struct FulfillmentApi<B> {
    db: B,
}

impl<B> Debug for FulfillmentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FulfillmentApi")
    }
}

impl<B> FulfillmentApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> FulfillmentApi<B>
where B: FulfillmentManagement
{
    /// Fulfils the most recent matching order with the delivery described by `request`.
    ///
    /// Returns the id of the stock movement that was recorded. See [`FulfillmentManagement::fulfil_order`] for the
    /// full sequence of checks.
    pub async fn fulfil_order(&self, request: FulfillmentRequest) -> Result<i64, FulfillmentError> {
        request.validate()?;
        trace!("📦️ Fulfilling order for [{request}]");
        match self.db.fulfil_order(&request).await {
            Ok(id) => {
                info!("📦️ Delivery [{request}] recorded as stock movement #{id}");
                Ok(id)
            },
            Err(e) => {
                log_failure(&request, &e);
                Err(e)
            },
        }
    }

    pub async fn stock_movement(&self, id: i64) -> Result<Option<StockMovement>, FulfillmentError> {
        self.db.fetch_stock_movement(id).await
    }

    pub async fn order(&self, id: i64) -> Result<Option<Order>, FulfillmentError> {
        self.db.fetch_order(id).await
    }

    pub async fn stock_movements_for_order(&self, order_id: i64) -> Result<Vec<StockMovement>, FulfillmentError> {
        self.db.fetch_stock_movements_for_order(order_id).await
    }
}

impl<B> FulfillmentApi<B>
where B: ProcedureFulfillment
{
    /// Hands the delivery to the database's `add_product_to_warehouse` procedure.
    ///
    /// The procedure is responsible for matching, pricing and recording. If it returns no id, the request is rejected
    /// with [`FulfillmentError::ProcedureReturnedNothing`].
    pub async fn fulfil_order_via_procedure(&self, request: FulfillmentRequest) -> Result<i64, FulfillmentError> {
        request.validate()?;
        trace!("📦️ Delegating [{request}] to stored procedure");
        let result = self.db.add_product_via_procedure(&request).await.and_then(|id| {
            id.ok_or_else(|| {
                warn!("📦️ Stored procedure returned no stock movement id for [{request}]");
                FulfillmentError::ProcedureReturnedNothing
            })
        });
        match result {
            Ok(id) => {
                info!("📦️ Delivery [{request}] recorded by stored procedure as stock movement #{id}");
                Ok(id)
            },
            Err(e) => {
                log_failure(&request, &e);
                Err(e)
            },
        }
    }
}

fn log_failure(request: &FulfillmentRequest, e: &FulfillmentError) {
    if e.is_client_error() {
        debug!("📦️ Delivery [{request}] rejected. {e}");
    } else {
        error!("📦️ Delivery [{request}] could not be processed. {e}");
    }
}
