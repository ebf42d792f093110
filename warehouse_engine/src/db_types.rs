use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use wms_common::Money;

use crate::wms_api::errors::FulfillmentError;

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// The unit price of the product
    pub price: Money,
}

//--------------------------------------      Warehouse      ---------------------------------------------------------
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub address: String,
}

//--------------------------------------        Order        ---------------------------------------------------------
/// A demand for `amount` units of a product. The order is fulfilled once a stock movement has been recorded against
/// it, at which point `fulfilled_at` is set.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub product_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled_at.is_some()
    }
}

//--------------------------------------    StockMovement    ---------------------------------------------------------
/// A record of stock allocated to a warehouse against a specific order. Stored in the `product_warehouse` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: i64,
    pub warehouse_id: i64,
    pub product_id: i64,
    pub order_id: i64,
    pub amount: i64,
    /// The total price of the movement, i.e. unit price × amount
    pub price: Money,
    pub created_at: DateTime<Utc>,
}

/// The values written for a new stock movement. The id is generated by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStockMovement {
    pub warehouse_id: i64,
    pub product_id: i64,
    pub order_id: i64,
    pub amount: i64,
    pub price: Money,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------  FulfillmentRequest ---------------------------------------------------------
/// A delivery of `amount` units of a product into a warehouse, to be matched against an open order that was placed
/// before `created_at`.
///
/// `createdAt` is an RFC 3339 timestamp. A timestamp without an offset, e.g. `2024-06-01T12:00:00`, is taken as UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FulfillmentRequest {
    #[serde(rename = "idProduct")]
    pub product_id: i64,
    #[serde(rename = "idWarehouse")]
    pub warehouse_id: i64,
    pub amount: i64,
    #[serde(rename = "createdAt", deserialize_with = "utc_or_naive_timestamp")]
    pub created_at: DateTime<Utc>,
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn utc_or_naive_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where D: Deserializer<'de> {
    let s = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| de::Error::custom(format!("{s} is not a valid timestamp")))
}

impl FulfillmentRequest {
    pub fn new(product_id: i64, warehouse_id: i64, amount: i64, created_at: DateTime<Utc>) -> Self {
        Self { product_id, warehouse_id, amount, created_at }
    }

    /// Checks the request for errors that can be detected without touching the database.
    pub fn validate(&self) -> Result<(), FulfillmentError> {
        if self.amount <= 0 {
            return Err(FulfillmentError::InvalidAmount(self.amount));
        }
        Ok(())
    }
}

impl Display for FulfillmentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x product #{} into warehouse #{} at {}",
            self.amount, self.product_id, self.warehouse_id, self.created_at
        )
    }
}
