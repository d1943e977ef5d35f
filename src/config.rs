use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

pub struct StoreConfig {
    pub data_path: PathBuf,
}

impl StoreConfig {
    pub fn init() -> Self {
        dotenv().ok();

        let data_path = env::var("CATALOG_DATA_PATH")
            .unwrap_or_else(|_| "catalog.json".to_string());

        StoreConfig {
            data_path: PathBuf::from(data_path),
        }
    }
}
