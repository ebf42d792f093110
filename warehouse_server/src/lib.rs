//! # Warehouse server
//! This crate hosts the HTTP server for the warehouse fulfillment service. It is responsible for:
//! Accepting delivery notifications and fulfilling the matching order, either in-process or via the database's stored
//! procedure.
//! Mapping fulfillment failures onto HTTP status codes.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /warehouse`: Fulfils an order in-process and records a stock movement.
//! * `POST /warehouse/procedure`: Fulfils an order via the `add_product_to_warehouse` stored procedure.
//! * `GET /warehouse/{id}`: Fetches a recorded stock movement.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
