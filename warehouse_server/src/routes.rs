//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Database access must always be awaited, never blocked on.
use actix_web::{get, http::header, web, HttpResponse, Responder};
use log::*;
use warehouse_engine::{
    db_types::FulfillmentRequest,
    traits::{FulfillmentManagement, ProcedureFulfillment},
    FulfillmentApi,
};

use crate::{data_objects::NewStockMovementResponse, errors::ServerError};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Warehouse  ----------------------------------------------------
route!(fulfil_order => Post "/warehouse" impl FulfillmentManagement);
/// Route handler for the in-process fulfillment endpoint
///
/// The body describes a delivery: `{ "idProduct", "idWarehouse", "amount", "createdAt" }`. The most recent order for
/// the same product and amount placed before `createdAt` is fulfilled, and a stock movement is recorded for it.
/// `createdAt` is an RFC 3339 timestamp. Timestamps without an offset are taken as UTC.
///
/// On success, returns `201 Created` with the new stock movement id, and a `Location` header pointing at it.
pub async fn fulfil_order<B: FulfillmentManagement>(
    body: web::Json<FulfillmentRequest>,
    api: web::Data<FulfillmentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST fulfil_order for [{request}]");
    let id = api.fulfil_order(request).await?;
    Ok(created(NewStockMovementResponse { id }))
}

route!(fulfil_order_via_procedure => Post "/warehouse/procedure" impl ProcedureFulfillment);
/// Route handler for the stored procedure fulfillment endpoint
///
/// Accepts the same body as `POST /warehouse`, but the whole workflow is carried out by the database's
/// `add_product_to_warehouse` procedure. Errors raised by the procedure are returned as `400 Bad Request` with the
/// procedure's message.
pub async fn fulfil_order_via_procedure<B: ProcedureFulfillment>(
    body: web::Json<FulfillmentRequest>,
    api: web::Data<FulfillmentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST fulfil_order_via_procedure for [{request}]");
    let id = api.fulfil_order_via_procedure(request).await?;
    Ok(created(NewStockMovementResponse { id }))
}

route!(stock_movement => Get "/warehouse/{id}" impl FulfillmentManagement);
pub async fn stock_movement<B: FulfillmentManagement>(
    path: web::Path<i64>,
    api: web::Data<FulfillmentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET stock_movement #{id}");
    let movement = api
        .stock_movement(id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Stock movement #{id} does not exist")))?;
    Ok(HttpResponse::Ok().json(movement))
}

fn created(response: NewStockMovementResponse) -> HttpResponse {
    HttpResponse::Created().insert_header((header::LOCATION, response.location())).json(response)
}
