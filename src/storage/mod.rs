use async_trait::async_trait;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::LoggedMessage;

const CREATE_MESSAGES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS messages (
    chat_id INTEGER,
    message_text TEXT,
    message_date INTEGER
)";

/// Append-only record of every inbound message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn append(&self, message: &LoggedMessage) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SqliteMessageLog {
    pool: SqlitePool,
}

impl SqliteMessageLog {
    /// Opens (creating the file if needed) and makes sure the table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        let log = Self::from_pool(pool).await?;
        info!("Message log ready at {}", config.url);
        Ok(log)
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(CREATE_MESSAGES_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageLog for SqliteMessageLog {
    async fn append(&self, message: &LoggedMessage) -> Result<()> {
        sqlx::query("INSERT INTO messages (chat_id, message_text, message_date) VALUES (?, ?, ?)")
            .bind(message.chat_id)
            .bind(&message.text)
            .bind(message.timestamp)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
