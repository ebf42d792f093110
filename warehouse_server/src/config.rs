use std::env;

use log::*;
use wms_common::{helpers::parse_boolean_flag, Secret};

const DEFAULT_WMS_HOST: &str = "127.0.0.1";
const DEFAULT_WMS_PORT: u16 = 8370;
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The URL of the database. The scheme (`sqlite:` or `postgres:`) selects the backend.
    pub database_url: Secret<String>,
    /// The maximum number of pooled database connections.
    pub max_connections: u32,
    /// If false, the access log middleware is not installed.
    pub access_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_WMS_HOST.to_string(),
            port: DEFAULT_WMS_PORT,
            database_url: Secret::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            access_log: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("WMS_HOST").ok().unwrap_or_else(|| DEFAULT_WMS_HOST.into());
        let port = env::var("WMS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for WMS_PORT. {e} Using the default, {DEFAULT_WMS_PORT}, instead."
                    );
                    DEFAULT_WMS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_WMS_PORT);
        let database_url = env::var("WMS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ WMS_DATABASE_URL is not set. Please set it to the URL for the warehouse database.");
            String::default()
        });
        let max_connections = env::var("WMS_DB_MAX_CONNECTIONS")
            .map_err(|_| {
                info!("🪛️ WMS_DB_MAX_CONNECTIONS is not set. Using the default value of {DEFAULT_MAX_CONNECTIONS}.")
            })
            .and_then(|s| {
                s.parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| warn!("🪛️ Invalid configuration value for WMS_DB_MAX_CONNECTIONS: {s}"))
            })
            .ok()
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let access_log = parse_boolean_flag(env::var("WMS_ACCESS_LOG").ok(), true);
        Self { host, port, database_url: Secret::new(database_url), max_connections, access_log }
    }
}
