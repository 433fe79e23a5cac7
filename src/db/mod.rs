//! Database module providing connection management, schema setup, and queries.

pub mod api_keys;
pub mod retry;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseSettings;
use crate::error::AppResult;
use retry::{RetryPolicy, retry_fixed};

/// Connect timeout for the administrative connection, and the bound on
/// opening the pool during one startup attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a request may wait for a free pooled connection. sqlx needs a
/// finite value; a year is never reached in practice.
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Schema of the only table. Run on every startup attempt.
pub const CREATE_API_KEYS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS api_keys (
    id INT AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(191) NOT NULL,
    name VARCHAR(191) DEFAULT '',
    `key` VARCHAR(255) NOT NULL,
    createdAt DATETIME NOT NULL
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Database connection pool wrapper.
///
/// Built once at startup and shared read-only with every handler.
#[derive(Clone)]
pub struct DbPool {
    conn: Arc<DatabaseConnection>,
}

impl DbPool {
    /// Wrap an existing connection.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    /// Take the connection back once no other handle shares it.
    pub fn into_connection(self) -> Option<DatabaseConnection> {
        Arc::try_unwrap(self.conn).ok()
    }

    /// Create the database and `api_keys` table if needed and open the pool.
    ///
    /// Each attempt starts from scratch; after `retry_attempts` failures the
    /// last error is returned.
    pub async fn initialize(settings: &DatabaseSettings) -> AppResult<Self> {
        let policy = RetryPolicy {
            max_attempts: settings.retry_attempts,
            delay: settings.retry_delay,
        };

        let conn = retry_fixed(policy, "db_init", |attempt| {
            Self::try_initialize(settings, attempt)
        })
        .await?;

        info!("DB initialized successfully");
        Ok(Self::from_connection(conn))
    }

    async fn try_initialize(
        settings: &DatabaseSettings,
        attempt: u32,
    ) -> Result<DatabaseConnection, DbErr> {
        info!(
            attempt,
            "DB init attempt {} -> {}:{} (db={})",
            attempt,
            settings.host,
            settings.port,
            settings.name
        );

        let admin = Database::connect(admin_options(settings)).await?;
        admin
            .execute_unprepared(&format!(
                "CREATE DATABASE IF NOT EXISTS `{}` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
                settings.name
            ))
            .await?;
        admin.close().await?;

        // The pool itself waits indefinitely for connections, so bound the
        // startup steps that use it to keep each attempt finite.
        let open_pool = async {
            let conn = Database::connect(pool_options(settings)).await?;
            ensure_schema(&conn).await?;
            Ok::<_, DbErr>(conn)
        };
        tokio::time::timeout(CONNECT_TIMEOUT, open_pool)
            .await
            .map_err(|_| DbErr::Custom("timed out opening the connection pool".to_string()))?
    }

    /// Get the pooled connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

/// Create the `api_keys` table if it does not exist.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    conn.execute_unprepared(CREATE_API_KEYS_TABLE).await?;
    Ok(())
}

fn admin_options(settings: &DatabaseSettings) -> ConnectOptions {
    let mut options = ConnectOptions::new(settings.server_url());
    options
        .max_connections(1)
        .min_connections(0)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    options
}

fn pool_options(settings: &DatabaseSettings) -> ConnectOptions {
    let mut options = ConnectOptions::new(settings.database_url());
    options
        .max_connections(settings.pool_size)
        .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
        .sqlx_logging(false);
    options
}
