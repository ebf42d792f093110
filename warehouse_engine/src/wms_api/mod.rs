//! # Warehouse engine public API
//!
//! The `wms_api` module exposes the programmatic API for the fulfillment engine.
//!
//! * [`fulfillment_api`] validates delivery requests and runs them through the fulfillment workflow, either in-process
//!   or via the database's stored procedure.
//! * [`errors`] holds the error taxonomy shared by the API and the backends.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits the API needs.
//!
//! ```rust,ignore
//! use warehouse_engine::{FulfillmentApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/wms_store.db", 5).await?;
//! // SqliteDatabase implements FulfillmentManagement
//! let api = FulfillmentApi::new(db);
//! let movement_id = api.fulfil_order(request).await?;
//! ```

pub mod errors;
pub mod fulfillment_api;
