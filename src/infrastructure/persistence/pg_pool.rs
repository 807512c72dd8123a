use std::str::FromStr;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::application::ports::RepositoryError;

const FIRST_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Opens the pool, making up to `connect_retries + 1` attempts. The wait
/// between attempts doubles up to eight seconds so the service can start
/// alongside its database.
pub async fn create_pool(
    url: &str,
    max_connections: u32,
    connect_retries: u32,
) -> Result<PgPool, RepositoryError> {
    let options = PgConnectOptions::from_str(url)
        .map_err(|e| RepositoryError::Unavailable(format!("invalid database url: {e}")))?;
    let host = options.get_host().to_string();
    let pool_options = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5));

    let mut backoff = FIRST_BACKOFF;
    for attempt in 0..=connect_retries {
        match pool_options.clone().connect_with(options.clone()).await {
            Ok(pool) => {
                tracing::info!(%host, max_connections, "Postgres pool ready");
                return Ok(pool);
            }
            Err(e) if attempt < connect_retries => {
                tracing::warn!(
                    %host,
                    error = %e,
                    attempt = attempt + 1,
                    wait_ms = backoff.as_millis() as u64,
                    "Postgres not reachable yet"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
            Err(e) => return Err(RepositoryError::Unavailable(e.to_string())),
        }
    }
    Err(RepositoryError::Unavailable(format!("{host}: no connection attempts made")))
}

/// Applies the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::Migration(e.to_string()))?;
    tracing::info!("Migrations applied");
    Ok(())
}
