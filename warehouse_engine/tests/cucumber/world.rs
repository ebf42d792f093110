use chrono::{DateTime, TimeZone, Utc};
use cucumber::World;
use log::*;
use warehouse_engine::{
    test_utils::prepare_env::{create_database, random_db_path, run_migrations},
    FulfillmentApi,
    FulfillmentError,
    SqliteDatabase,
};

#[derive(Default, Debug, World)]
pub struct WarehouseWorld {
    pub system: Option<FulfillmentSystem>,
    pub last_result: Option<Result<i64, FulfillmentError>>,
}

#[derive(Debug)]
pub struct FulfillmentSystem {
    pub db_path: String,
    pub api: FulfillmentApi<SqliteDatabase>,
    /// Every delivery in a scenario arrives at this moment. Order timestamps are given relative to it.
    pub delivery_time: DateTime<Utc>,
}

impl WarehouseWorld {
    pub fn api(&self) -> &FulfillmentApi<SqliteDatabase> {
        &self.system().api
    }

    pub fn system(&self) -> &FulfillmentSystem {
        self.system.as_ref().expect("FulfillmentApi not initialised")
    }

    pub fn last_result(&self) -> &Result<i64, FulfillmentError> {
        self.last_result.as_ref().expect("No delivery has been made yet")
    }
}

impl FulfillmentSystem {
    pub async fn new() -> Self {
        let url = prepare_test_env().await;
        let db = SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating connection to database");
        debug!("Created database: {url}");
        let api = FulfillmentApi::new(db);
        let delivery_time = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Self { db_path: url, api, delivery_time }
    }
}

pub async fn prepare_test_env() -> String {
    let path = random_db_path();
    create_database(&path).await;
    run_migrations(&path).await;
    path
}
