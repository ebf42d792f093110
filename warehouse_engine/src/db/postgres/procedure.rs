use log::*;
use sqlx::{PgConnection, Row};

use crate::{db_types::FulfillmentRequest, FulfillmentError};

/// SQLSTATE class for errors raised from PL/pgSQL. `RAISE EXCEPTION` without an explicit code produces `P0001`.
const PLPGSQL_ERROR_CLASS: &str = "P0";

/// Calls `add_product_to_warehouse` and returns the id it produced, if any.
pub async fn add_product_to_warehouse(
    request: &FulfillmentRequest,
    conn: &mut PgConnection,
) -> Result<Option<i64>, FulfillmentError> {
    let row = sqlx::query("SELECT add_product_to_warehouse($1, $2, $3, $4) AS id")
        .bind(request.product_id)
        .bind(request.warehouse_id)
        .bind(request.amount)
        .bind(request.created_at)
        .fetch_optional(conn)
        .await
        .map_err(classify_procedure_error)?;
    let id = match row {
        Some(row) => row.try_get::<Option<i64>, _>("id").map_err(classify_procedure_error)?,
        None => None,
    };
    trace!("🗃️ add_product_to_warehouse returned {id:?} for [{request}]");
    Ok(id)
}

/// Maps a database error from the procedure call onto the fulfillment error taxonomy. Errors the procedure raised on
/// purpose carry their message through as [`FulfillmentError::ProcedureRejected`].
pub fn classify_procedure_error(e: sqlx::Error) -> FulfillmentError {
    let signaled = match &e {
        sqlx::Error::Database(db_err) => signaled_error(db_err.code().as_deref(), db_err.message()),
        _ => None,
    };
    signaled.unwrap_or_else(|| {
        warn!("🗃️ Stored procedure call failed. {e}");
        FulfillmentError::from(e)
    })
}

/// Returns `ProcedureRejected` if `code` is a SQLSTATE raised from PL/pgSQL code.
pub fn signaled_error(code: Option<&str>, message: &str) -> Option<FulfillmentError> {
    match code {
        Some(c) if c.starts_with(PLPGSQL_ERROR_CLASS) => {
            debug!("🗃️ Stored procedure rejected the request ({c}): {message}");
            Some(FulfillmentError::ProcedureRejected(message.to_string()))
        },
        _ => None,
    }
}
