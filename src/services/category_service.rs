//! Category management

use std::sync::Arc;

use crate::errors::{LinkshelfError, Result};
use crate::storage::{Category, CategoryWithCount, CategoryWithUrls, SeaOrmStorage};

pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// 规范化分类名称（去除首尾空白并检查长度）
pub fn normalize_category_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LinkshelfError::invalid_input("Category name is required"));
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(LinkshelfError::invalid_input(
            "Category name must be at most 50 characters",
        ));
    }
    Ok(trimmed.to_string())
}

pub struct CategoryService {
    storage: Arc<SeaOrmStorage>,
}

impl CategoryService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let name = normalize_category_name(name)?;
        self.storage.insert_category(&name).await
    }

    /// 按名称字母序列出分类
    pub async fn list_categories(&self) -> Result<Vec<CategoryWithCount>> {
        self.storage.list_categories_with_counts().await
    }

    pub async fn get_category(&self, id: i64) -> Result<CategoryWithUrls> {
        self.storage
            .find_category_with_urls(id)
            .await?
            .ok_or_else(|| LinkshelfError::not_found(format!("Category not found: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_category_name("  Docs  ").unwrap(), "Docs");
    }

    #[test]
    fn test_normalize_rejects_blank_and_long() {
        assert!(matches!(
            normalize_category_name("   "),
            Err(LinkshelfError::InvalidInput(_))
        ));
        assert!(normalize_category_name(&"x".repeat(50)).is_ok());
        assert!(normalize_category_name(&"x".repeat(51)).is_err());
    }
}
