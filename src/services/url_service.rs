//! Short url management

use std::sync::Arc;

use tracing::info;

use crate::errors::{LinkshelfError, Result};
use crate::storage::{NewShortUrl, SeaOrmStorage, ShortUrlWithCategories};

pub struct UrlService {
    storage: Arc<SeaOrmStorage>,
}

impl UrlService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 创建短链接（输入已在 API 层校验）
    pub async fn create_url(&self, new_url: NewShortUrl) -> Result<ShortUrlWithCategories> {
        let created = self.storage.insert_url(new_url).await?;
        info!(
            "UrlService: created {} -> {} with {} categories",
            created.url.short_code,
            created.url.target_url,
            created.categories.len()
        );
        Ok(created)
    }

    pub async fn list_urls(&self) -> Result<Vec<ShortUrlWithCategories>> {
        self.storage.load_urls_with_categories().await
    }

    pub async fn get_url(&self, id: i64) -> Result<ShortUrlWithCategories> {
        self.storage
            .find_url_with_categories(id)
            .await?
            .ok_or_else(|| LinkshelfError::not_found(format!("Short url not found: {}", id)))
    }
}
