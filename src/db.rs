//! Global database connection pool.

use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the database and store the pool globally.
/// Called once at startup by each binary; panics if called twice.
pub async fn init_db(database_url: String) {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(
            std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),
        )
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60));

    let pool = Database::connect(options)
        .await
        .expect("Failed to connect to database");

    DB_POOL
        .set(pool)
        .expect("init_db() called more than once");

    log::info!("Database pool initialized");
}

/// Get the global database pool.
/// Panics if init_db() has not run.
pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL.get().expect("Database pool is not initialized")
}
