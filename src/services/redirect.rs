//! Redirect resolution and click accounting

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::{debug, trace};

use crate::errors::{LinkshelfError, Result};
use crate::storage::{SeaOrmStorage, ShortUrl};

/// 跳转参数：数字按 ID 查找，其余按短码查找
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    Id(i64),
    Code(String),
}

impl LinkRef {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(LinkshelfError::missing_parameter("Short code is required"));
        }

        Ok(match raw.parse::<i64>() {
            Ok(id) => LinkRef::Id(id),
            Err(_) => LinkRef::Code(raw.to_string()),
        })
    }
}

impl std::fmt::Display for LinkRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkRef::Id(id) => write!(f, "#{}", id),
            LinkRef::Code(code) => f.write_str(code),
        }
    }
}

pub struct RedirectResolver {
    storage: Arc<SeaOrmStorage>,
}

impl RedirectResolver {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    async fn lookup(&self, link: &LinkRef) -> Result<Option<ShortUrl>> {
        match link {
            LinkRef::Id(id) => self.storage.find_url_by_id(*id).await,
            LinkRef::Code(code) => self.storage.find_url_by_code(code).await,
        }
    }

    async fn find(&self, raw: &str) -> Result<(LinkRef, ShortUrl)> {
        let link = LinkRef::parse(raw)?;
        let url = self
            .lookup(&link)
            .await?
            .ok_or_else(|| LinkshelfError::not_found(format!("Short url not found: {}", link)))?;
        Ok((link, url))
    }

    /// 只解析跳转目标，不记录点击（HEAD 请求）
    pub async fn peek(&self, raw: &str) -> Result<String> {
        let (_, url) = self.find(raw).await?;
        Ok(url.target_url)
    }

    /// 解析跳转目标并记录点击
    ///
    /// 链接点击数 +1 后，所属分类的点击数并发 +1，全部完成才返回。
    /// 两步不在同一事务中。
    pub async fn resolve(&self, raw: &str) -> Result<String> {
        let (link, url) = self.find(raw).await?;

        if !self.storage.increment_url_click(url.id, Utc::now()).await? {
            return Err(LinkshelfError::not_found(format!(
                "Short url not found: {}",
                link
            )));
        }

        let category_ids = self.storage.category_ids_for_url(url.id).await?;
        if !category_ids.is_empty() {
            try_join_all(
                category_ids
                    .iter()
                    .map(|id| self.storage.increment_category_click(*id)),
            )
            .await?;
            trace!(
                "Fanned out click of {} to {} categories",
                url.short_code,
                category_ids.len()
            );
        }

        debug!("Redirect {} -> {}", link, url.target_url);
        Ok(url.target_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_as_id() {
        assert_eq!(LinkRef::parse("42").unwrap(), LinkRef::Id(42));
        assert_eq!(LinkRef::parse("-3").unwrap(), LinkRef::Id(-3));
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(
            LinkRef::parse("docs").unwrap(),
            LinkRef::Code("docs".to_string())
        );
        assert_eq!(
            LinkRef::parse("42a").unwrap(),
            LinkRef::Code("42a".to_string())
        );
        // 超出 i64 范围时按短码处理
        assert!(matches!(
            LinkRef::parse("99999999999999999999").unwrap(),
            LinkRef::Code(_)
        ));
    }

    #[test]
    fn test_parse_empty_is_missing_parameter() {
        assert!(matches!(
            LinkRef::parse(""),
            Err(LinkshelfError::MissingParameter(_))
        ));
    }
}
