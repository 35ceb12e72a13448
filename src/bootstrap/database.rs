use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::shared::config::Config;

pub async fn connect_postgres(config: &Config) -> DatabaseConnection {
    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .connect_timeout(Duration::from_secs(config.database_connect_timeout))
        .idle_timeout(Duration::from_secs(config.database_idle_timeout))
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .expect("Failed to connect to database")
}
