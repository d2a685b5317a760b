use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub click_count: u64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
}

/// 短链接及其所属分类
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortUrlWithCategories {
    pub url: ShortUrl,
    pub categories: Vec<Category>,
}

/// 分类及其关联链接数量（列表页使用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub category: Category,
    pub url_count: u64,
}

/// 分类及其关联链接
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithUrls {
    pub category: Category,
    pub urls: Vec<ShortUrl>,
}

/// 待写入的新短链接
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub short_code: String,
    pub target_url: String,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
