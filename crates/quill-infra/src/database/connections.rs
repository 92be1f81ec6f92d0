use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// An in-memory SQLite database exists per connection, so the pool must
    /// hold exactly one.
    fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }
}

/// Open the connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let (max, min) = if config.is_sqlite_memory() {
        (1, 1)
    } else {
        let max = config.max_connections.max(1);
        (max, config.min_connections.min(max))
    };

    let opts = ConnectOptions::new(&config.url)
        .max_connections(max)
        .min_connections(min)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let db = Database::connect(opts).await?;
    tracing::info!(pool_max = max, pool_min = min, "Database connected");

    Ok(db)
}
