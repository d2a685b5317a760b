use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{
    Category, CategoryWithCount, CategoryWithUrls, NewShortUrl, Session, ShortUrl,
    ShortUrlWithCategories, User,
};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;

        let storage =
            SeaOrmStorage::new(&config.database_url, &backend_type, config.pool_size).await?;
        Ok(Arc::new(storage))
    }
}
