use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::core::config::DatabaseConfig;
use crate::stores::user_store::UserStore;

/// Open the connection pool described by `config`
///
/// An in-memory database lives and dies with its connection, so such URLs get
/// a single connection that is never recycled.
pub async fn connect_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .context(format!("Invalid database url: {}", config.url))?
        .create_if_missing(true);

    let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
        .context(format!("Failed to connect to database: {}", config.url))?;

    info!(
        url = %config.url,
        max_connections = if in_memory { 1 } else { config.max_connections },
        "Database pool initialized"
    );

    Ok(pool)
}

// this runs at boot time
pub async fn prepare_store(config: &DatabaseConfig) -> Result<UserStore> {
    let pool = connect_database(config).await?;
    let store = UserStore::new(pool);

    store
        .migrate()
        .await
        .context("Failed to create users table")?;

    info!("Database schema ready");

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_prepare_store_is_idempotent() {
        let store = prepare_store(&memory_config()).await.unwrap();
        store.migrate().await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_database_persists_across_pools() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("users.db").display()),
            max_connections: 2,
            acquire_timeout_secs: 5,
        };

        let store = prepare_store(&config).await.unwrap();
        store
            .save(crate::models::user::NewUser::new(
                "alice".to_string(),
                "h".to_string(),
                crate::models::user::Role::Admin,
            ))
            .await
            .unwrap();
        store.pool().close().await;

        let reopened = prepare_store(&config).await.unwrap();
        let users = reopened.find_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
    }

    #[tokio::test]
    async fn test_unreachable_database() {
        let config = DatabaseConfig {
            url: "sqlite:///nonexistent-dir/nested/users.db".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        };
        assert!(connect_database(&config).await.is_err());
    }
}
