use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware, web, App, HttpServer};
use log::*;
#[cfg(feature = "postgres")]
use warehouse_engine::PostgresDatabase;
use warehouse_engine::{
    traits::{FulfillmentManagement, ProcedureFulfillment},
    FulfillmentApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{health, FulfilOrderRoute, FulfilOrderViaProcedureRoute, StockMovementRoute},
};

/// Connects to the database named in the configuration and runs the server until it is shut down.
///
/// The backend is chosen from the scheme of the database URL.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let url = config.database_url.reveal().clone();
    let max_connections = config.max_connections;
    let srv = match url.split_once(':').map(|(scheme, _)| scheme) {
        Some("sqlite") => {
            info!("🚀️ Using the SQLite backend");
            let db = SqliteDatabase::new_with_url(&url, max_connections)
                .await
                .map_err(|e| ServerError::InitializeError(e.to_string()))?;
            create_server_instance(config, db)?
        },
        #[cfg(feature = "postgres")]
        Some("postgres") | Some("postgresql") => {
            info!("🚀️ Using the Postgres backend");
            let db = PostgresDatabase::new_with_url(&url, max_connections)
                .await
                .map_err(|e| ServerError::InitializeError(e.to_string()))?;
            create_server_instance(config, db)?
        },
        Some(scheme) => {
            return Err(ServerError::ConfigurationError(format!("Unsupported database scheme: {scheme}")));
        },
        None => {
            return Err(ServerError::ConfigurationError("WMS_DATABASE_URL is not a valid database URL".into()));
        },
    };
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<B>(config: ServerConfig, db: B) -> Result<Server, ServerError>
where B: FulfillmentManagement + ProcedureFulfillment + Clone + Send + 'static
{
    info!("🚀️ Starting server on {}:{}", config.host, config.port);
    let access_log = config.access_log;
    let srv = HttpServer::new(move || {
        let api = FulfillmentApi::new(db.clone());
        App::new()
            .wrap(middleware::Condition::new(
                access_log,
                middleware::Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("wms::access_log"),
            ))
            .app_data(web::Data::new(api))
            .app_data(json_config())
            .app_data(path_config())
            .service(health)
            .service(FulfilOrderViaProcedureRoute::<B>::new())
            .service(FulfilOrderRoute::<B>::new())
            .service(StockMovementRoute::<B>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}
