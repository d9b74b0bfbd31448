use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("connexion à la base impossible : {0}")]
    Connect(#[from] sqlx::Error),

    #[error("échec des migrations : {0}")]
    Migrate(#[from] MigrateError),
}

async fn connect_to_db(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let db_pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(15))
        .connect(url)
        .await?;

    Ok(db_pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    tracing::info!("running migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("migrations applied");
    Ok(())
}

pub async fn init_db(url: &str, max_connections: u32) -> Result<PgPool, DbInitError> {
    let pool = connect_to_db(url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
