/// Database access layer
///
/// Pool construction, embedded migrations and one repository module per
/// table. Repository functions are thin wrappers over SQL; rules such as
/// visibility and ownership live in `services` and `middleware`.
pub mod category_repo;
pub mod comment_repo;
pub mod location_repo;
pub mod post_repo;
pub mod user_repo;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        connect_timeout_secs = config.connect_timeout_secs,
        "creating database pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
