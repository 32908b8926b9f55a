use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::debug;

use crate::config::DatabaseConfig;

pub async fn establish_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.database_url();
    let mut opt = ConnectOptions::new(database_url.clone());

    // Every pooled connection to `sqlite::memory:` would see its own empty database
    let max_connections = if config.is_in_memory() {
        1
    } else {
        config.max_connections.max(1)
    };

    opt.max_connections(max_connections)
        .min_connections(config.min_connections.min(max_connections))
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.connect_timeout())
        .sqlx_logging(config.sqlx_logging)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    debug!("Connecting to {}", database_url);
    Database::connect(opt).await
}
