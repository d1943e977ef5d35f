mod config;
mod form;
mod models;
mod notify;
mod session;
mod store;
mod ui;

use config::StoreConfig;
use store::CatalogStore;
use tracing::{info, Level};
use tracing_subscriber::{self, EnvFilter};

fn main() -> std::io::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::WARN.into())
                .add_directive("product_catalog=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting product catalog manager");

    let config = StoreConfig::init();
    let mut store = CatalogStore::open(&config);

    ui::run(&mut store)
}
