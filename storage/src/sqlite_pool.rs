//! SQLite 连接池封装：storage crate 内部使用。

use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::PersistenceError;

/// 单连接 SQLite 连接池；数据库文件不存在时自动创建。
///
/// 只有一个连接，所以所有语句在存储层串行执行；`sqlite::memory:` 数据库在连接池存活期间一直有效。
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// 为 `database_url` 创建连接池：支持 `sqlite:` URL、`file:` 路径或普通路径。
    pub async fn new(database_url: &str) -> Result<Self, PersistenceError> {
        info!("Initializing SQLite pool: {}", database_url);

        let options = connect_options(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// 返回底层连接池，用于执行查询。
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, PersistenceError> {
    if database_url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PersistenceError::InvalidUrl(format!("{}: {}", database_url, e)))
    } else {
        let path = database_url.strip_prefix("file:").unwrap_or(database_url);
        if path.is_empty() {
            return Err(PersistenceError::InvalidUrl(database_url.to_string()));
        }
        Ok(SqliteConnectOptions::new().filename(path))
    }
}
