//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Func},
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_category, model_to_session, model_to_short_url, model_to_user};
use crate::errors::Result;
use crate::storage::models::{
    Category, CategoryWithCount, CategoryWithUrls, Session, ShortUrl, ShortUrlWithCategories, User,
};

use migration::entities::{category, session, short_url, url_category, user};

/// 分类关联数量聚合结果
#[derive(Debug, FromQueryResult)]
struct CategoryUrlCount {
    category_id: i64,
    url_count: i64,
}

impl SeaOrmStorage {
    pub async fn find_url_by_id(&self, id: i64) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_short_url))
    }

    pub async fn find_url_by_code(&self, code: &str) -> Result<Option<ShortUrl>> {
        let model = short_url::Entity::find()
            .filter(short_url::Column::ShortCode.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_short_url))
    }

    /// 某个短链接所属的分类 ID 列表
    pub async fn category_ids_for_url(&self, url_id: i64) -> Result<Vec<i64>> {
        let ids = url_category::Entity::find()
            .select_only()
            .column(url_category::Column::CategoryId)
            .filter(url_category::Column::UrlId.eq(url_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(ids)
    }

    pub async fn find_categories_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_category).collect())
    }

    /// 加载单个短链接及其分类
    pub async fn find_url_with_categories(
        &self,
        id: i64,
    ) -> Result<Option<ShortUrlWithCategories>> {
        let Some(url) = self.find_url_by_id(id).await? else {
            return Ok(None);
        };

        let category_ids = self.category_ids_for_url(url.id).await?;
        let categories = self.find_categories_by_ids(&category_ids).await?;

        Ok(Some(ShortUrlWithCategories { url, categories }))
    }

    /// 加载全部短链接及其分类（按 id 升序）
    pub async fn load_urls_with_categories(&self) -> Result<Vec<ShortUrlWithCategories>> {
        let urls = short_url::Entity::find()
            .order_by_asc(short_url::Column::Id)
            .all(&self.db)
            .await?;

        let categories: HashMap<i64, Category> = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, model_to_category(m)))
            .collect();

        // url_id -> category ids
        let mut links: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in url_category::Entity::find().all(&self.db).await? {
            links.entry(row.url_id).or_default().push(row.category_id);
        }

        let result: Vec<ShortUrlWithCategories> = urls
            .into_iter()
            .map(|model| {
                let url = model_to_short_url(model);
                let mut cats: Vec<Category> = links
                    .get(&url.id)
                    .map(|ids| ids.iter().filter_map(|id| categories.get(id).cloned()).collect())
                    .unwrap_or_default();
                cats.sort_by(|a, b| a.name.cmp(&b.name));
                ShortUrlWithCategories {
                    url,
                    categories: cats,
                }
            })
            .collect();

        debug!("Loaded {} short urls with categories", result.len());
        Ok(result)
    }

    /// 全部分类（按名称字母序），附带关联链接数量
    pub async fn list_categories_with_counts(&self) -> Result<Vec<CategoryWithCount>> {
        let categories = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        let counts: HashMap<i64, i64> = url_category::Entity::find()
            .select_only()
            .column(url_category::Column::CategoryId)
            .column_as(
                sea_orm::sea_query::SimpleExpr::from(Func::count(Expr::col(url_category::Column::UrlId))),
                "url_count",
            )
            .group_by(url_category::Column::CategoryId)
            .into_model::<CategoryUrlCount>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| (row.category_id, row.url_count))
            .collect();

        Ok(categories
            .into_iter()
            .map(|model| {
                let url_count = counts.get(&model.id).copied().unwrap_or(0).max(0) as u64;
                CategoryWithCount {
                    category: model_to_category(model),
                    url_count,
                }
            })
            .collect())
    }

    /// 加载单个分类及其短链接
    pub async fn find_category_with_urls(&self, id: i64) -> Result<Option<CategoryWithUrls>> {
        let Some(model) = category::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let url_ids = url_category::Entity::find()
            .select_only()
            .column(url_category::Column::UrlId)
            .filter(url_category::Column::CategoryId.eq(id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;

        let urls = if url_ids.is_empty() {
            Vec::new()
        } else {
            short_url::Entity::find()
                .filter(short_url::Column::Id.is_in(url_ids))
                .order_by_asc(short_url::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(model_to_short_url)
                .collect()
        };

        Ok(Some(CategoryWithUrls {
            category: model_to_category(model),
            urls,
        }))
    }

    pub async fn count_urls(&self) -> Result<u64> {
        Ok(short_url::Entity::find().count(&self.db).await?)
    }

    /// 查找未过期的会话
    pub async fn find_valid_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>> {
        let model = session::Entity::find_by_id(token.to_string())
            .filter(session::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_session))
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_user))
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_user))
    }
}
