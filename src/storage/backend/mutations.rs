//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, Set, TransactionTrait,
    sea_query::Expr,
};
use tracing::{debug, info};

use super::converters::{model_to_category, model_to_short_url, model_to_user};
use super::{SeaOrmStorage, classify_write_error};
use crate::errors::{LinkshelfError, Result};
use crate::storage::models::{Category, NewShortUrl, ShortUrlWithCategories, User};

use migration::entities::{category, session, short_url, url_category, user};

impl SeaOrmStorage {
    /// 创建短链接及其分类关联（单事务）
    ///
    /// 未知分类 ID 返回 `InvalidInput`，短码重复返回 `Conflict`。
    pub async fn insert_url(&self, new_url: NewShortUrl) -> Result<ShortUrlWithCategories> {
        let category_ids: Vec<i64> = new_url
            .category_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let txn = self.db.begin().await.map_err(|e| {
            LinkshelfError::database_operation(format!("开始事务失败: {}", e))
        })?;

        let categories: Vec<Category> = if category_ids.is_empty() {
            Vec::new()
        } else {
            category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids.iter().copied()))
                .all(&txn)
                .await?
                .into_iter()
                .map(model_to_category)
                .collect()
        };

        if categories.len() != category_ids.len() {
            let missing: Vec<String> = category_ids
                .iter()
                .filter(|id| !categories.iter().any(|c| c.id == **id))
                .map(|id| id.to_string())
                .collect();
            return Err(LinkshelfError::invalid_input(format!(
                "Unknown category id: {}",
                missing.join(", ")
            )));
        }

        let short_code = new_url.short_code.clone();
        let model = short_url::ActiveModel {
            short_code: Set(new_url.short_code),
            target_url: Set(new_url.target_url),
            click_count: Set(0),
            last_clicked_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            classify_write_error(e, || format!("Short code '{}' already exists", short_code))
        })?;

        if !category_ids.is_empty() {
            let rows = category_ids.iter().map(|category_id| url_category::ActiveModel {
                url_id: Set(model.id),
                category_id: Set(*category_id),
            });
            url_category::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await.map_err(|e| {
            LinkshelfError::database_operation(format!("提交事务失败: {}", e))
        })?;

        let mut categories = categories;
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        info!("Short url created: {} (id={})", model.short_code, model.id);
        Ok(ShortUrlWithCategories {
            url: model_to_short_url(model),
            categories,
        })
    }

    pub async fn insert_category(&self, name: &str) -> Result<Category> {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            click_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error(e, || format!("Category '{}' already exists", name)))?;

        info!("Category created: {} (id={})", model.name, model.id);
        Ok(model_to_category(model))
    }

    /// 原子递增短链接点击数并记录最近点击时间
    ///
    /// 返回是否命中记录。
    pub async fn increment_url_click(&self, id: i64, now: DateTime<Utc>) -> Result<bool> {
        let result = short_url::Entity::update_many()
            .col_expr(
                short_url::Column::ClickCount,
                Expr::col(short_url::Column::ClickCount).add(1i64),
            )
            .col_expr(short_url::Column::LastClickedAt, Expr::value(now))
            .filter(short_url::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// 原子递增分类点击数
    pub async fn increment_category_click(&self, id: i64) -> Result<()> {
        category::Entity::update_many()
            .col_expr(
                category::Column::ClickCount,
                Expr::col(category::Column::ClickCount).add(1i64),
            )
            .filter(category::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// 按邮箱插入或更新用户
    pub async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<User> {
        if let Some(existing) = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
        {
            return match name {
                Some(name) if name != existing.name => {
                    let mut active: user::ActiveModel = existing.into();
                    active.name = Set(name.to_string());
                    Ok(model_to_user(active.update(&self.db).await?))
                }
                _ => Ok(model_to_user(existing)),
            };
        }

        let display_name = name
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        let inserted = user::ActiveModel {
            email: Set(email.to_string()),
            name: Set(display_name),
            avatar_url: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => {
                info!("User created: {} (id={})", model.email, model.id);
                Ok(model_to_user(model))
            }
            Err(e) => {
                // 并发登录时另一请求已插入同一邮箱
                let err = classify_write_error(e, || format!("User '{}' already exists", email));
                if matches!(err, LinkshelfError::Conflict(_)) {
                    self.find_user_by_email(email)
                        .await?
                        .ok_or(err)
                } else {
                    Err(err)
                }
            }
        }
    }

    pub async fn create_session(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        session::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;

        debug!("Session created for user {}", user_id);
        Ok(())
    }

    /// 删除会话，返回是否存在
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = session::Entity::delete_by_id(token.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// 清理过期会话
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            debug!("Purged {} expired sessions", result.rows_affected);
        }
        Ok(result.rows_affected)
    }
}
