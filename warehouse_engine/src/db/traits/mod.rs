//! # Database backend contracts
//!
//! The traits in this module define what a database backend must provide in order to be used by the fulfillment
//! engine.
//!
//! * [`FulfillmentManagement`] runs the order fulfillment workflow as a single atomic transaction, and exposes
//!   read access to the orders and stock movements it touches.
//! * [`ProcedureFulfillment`] hands the whole workflow to a stored procedure in the database. Backends without stored
//!   procedures return [`FulfillmentError::ProcedureUnsupported`](crate::FulfillmentError::ProcedureUnsupported).
mod fulfillment_management;
mod procedure_fulfillment;

pub use fulfillment_management::FulfillmentManagement;
pub use procedure_fulfillment::ProcedureFulfillment;
