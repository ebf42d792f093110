//! Warehouse fulfillment engine
//!
//! The engine matches incoming deliveries (a quantity of a product arriving at a warehouse) against open orders. A
//! delivery fulfils the most recent order for the same product and quantity that was placed before the delivery
//! arrived. Fulfilling an order stamps the order and records a priced stock movement, all inside one transaction.
//!
//! The library is divided into two main sections:
//! 1. Database backends ([`mod@db`]). SQLite and Postgres are supported. The data types stored in the database are
//!    defined in [`db_types`] and are public.
//! 2. The public API ([`FulfillmentApi`]). This validates requests and drives the backend. Backends implement the
//!    traits in [`traits`] in order to be used by the API.
mod db;

pub mod db_types;
mod wms_api;

#[cfg(all(feature = "sqlite", any(feature = "test_utils", test)))]
pub mod test_utils;

#[cfg(feature = "postgres")]
pub use db::postgres::{db::PostgresDatabase, procedure::classify_procedure_error};
#[cfg(feature = "sqlite")]
pub use db::sqlite::db::SqliteDatabase;
pub use db::traits;
pub use wms_api::{errors::FulfillmentError, fulfillment_api::FulfillmentApi};
