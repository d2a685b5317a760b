//! SeaORM storage backend
//!
//! The injected data-access handle for short URLs, categories, users and
//! sessions. Supports SQLite, MySQL/MariaDB and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr};
use tracing::warn;

use crate::errors::{LinkshelfError, Result};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_category, model_to_session, model_to_short_url, model_to_user};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkshelfError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 将写入错误分类：唯一约束冲突映射为 Conflict，其余为数据库操作错误
pub(crate) fn classify_write_error(err: DbErr, conflict_message: impl FnOnce() -> String) -> LinkshelfError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => LinkshelfError::conflict(conflict_message()),
        _ => LinkshelfError::database_operation(err.to_string()),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str, pool_size: u32) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkshelfError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, pool_size).await?
        };

        run_migrations(&db).await?;

        warn!("{} Storage initialized.", backend_name.to_uppercase());
        Ok(SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        })
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 连通性检查（健康检查使用）
    pub async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| LinkshelfError::database_connection(e.to_string()))
    }
}
