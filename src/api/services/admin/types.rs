//! Admin API 类型定义

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::LinkshelfError;
use crate::services::{AuthenticatedUser, normalize_category_name};
use crate::storage::{Category, CategoryWithCount, CategoryWithUrls, ShortUrl, ShortUrlWithCategories};
use crate::utils::url_validator::{validate_short_code, validate_target_url};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

// ============ 请求体校验 ============

/// 按声明顺序返回第一条字段错误
pub trait ValidateOrdered: Validate {
    const FIELD_ORDER: &'static [&'static str];

    fn validate_ordered(&self) -> Result<(), LinkshelfError> {
        self.validate()
            .map_err(|errors| LinkshelfError::invalid_input(first_error_message(&errors, Self::FIELD_ORDER)))
    }
}

fn first_error_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let first = order
        .iter()
        .find_map(|field| field_errors.get(*field).and_then(|errs| errs.first()).map(|e| (*field, e)));

    match first {
        Some((field, err)) => err
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("{} is invalid", field)),
        None => "Invalid request body".to_string(),
    }
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn check_short_code(code: &str) -> Result<(), ValidationError> {
    validate_short_code(code).map_err(|msg| with_message("short_code", msg))
}

fn check_target_url(url: &str) -> Result<(), ValidationError> {
    validate_target_url(url).map_err(|e| with_message("target_url", e.user_message()))
}

fn check_category_name(name: &str) -> Result<(), ValidationError> {
    normalize_category_name(name)
        .map(|_| ())
        .map_err(|e| ValidationError::new("name").with_message(Cow::Owned(e.message().to_string())))
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
}

impl ValidateOrdered for LoginRequest {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password", "name"];
}

#[derive(Deserialize, Clone, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(custom(function = "check_short_code"))]
    pub short_code: String,
    #[validate(custom(function = "check_target_url"))]
    pub target_url: String,
    #[serde(default)]
    pub category_ids: Option<Vec<i64>>,
}

impl ValidateOrdered for CreateUrlRequest {
    const FIELD_ORDER: &'static [&'static str] = &["short_code", "target_url", "category_ids"];
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct CreateCategoryRequest {
    #[validate(custom(function = "check_category_name"))]
    pub name: String,
}

impl ValidateOrdered for CreateCategoryRequest {
    const FIELD_ORDER: &'static [&'static str] = &["name"];
}

// ============ 响应体 ============

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            click_count: c.click_count,
            created_at: c.created_at,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UrlSummary {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub click_count: u64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ShortUrl> for UrlSummary {
    fn from(u: ShortUrl) -> Self {
        Self {
            id: u.id,
            short_code: u.short_code,
            target_url: u.target_url,
            click_count: u.click_count,
            last_clicked_at: u.last_clicked_at,
            created_at: u.created_at,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    #[serde(flatten)]
    pub url: UrlSummary,
    pub categories: Vec<CategoryResponse>,
}

impl From<ShortUrlWithCategories> for UrlResponse {
    fn from(item: ShortUrlWithCategories) -> Self {
        Self {
            url: item.url.into(),
            categories: item.categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListItem {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub url_count: u64,
}

impl From<CategoryWithCount> for CategoryListItem {
    fn from(item: CategoryWithCount) -> Self {
        Self {
            category: item.category.into(),
            url_count: item.url_count,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub urls: Vec<UrlSummary>,
}

impl From<CategoryWithUrls> for CategoryDetailResponse {
    fn from(item: CategoryWithUrls) -> Self {
        Self {
            category: item.category.into(),
            urls: item.urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AuthenticatedUser,
    pub session_expires_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub user: AuthenticatedUser,
    pub expires_at: i64,
}

#[derive(Serialize, Clone, Debug)]
pub struct AnalyticsAck {
    pub success: bool,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub storage_type: String,
    pub timestamp: DateTime<Utc>,
}
