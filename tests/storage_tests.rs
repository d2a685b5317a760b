//! Storage layer integration tests against a temporary SQLite database

mod common;

use chrono::{Duration, Utc};

use linkshelf::errors::LinkshelfError;
use linkshelf::storage::NewShortUrl;

fn new_url(code: &str, category_ids: Vec<i64>) -> NewShortUrl {
    NewShortUrl {
        short_code: code.to_string(),
        target_url: format!("https://example.com/{}", code),
        category_ids,
    }
}

#[tokio::test]
async fn test_insert_url_with_categories() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let rust = storage.insert_category("rust").await.unwrap();
    let docs = storage.insert_category("docs").await.unwrap();

    let created = storage
        .insert_url(new_url("book", vec![rust.id, docs.id, rust.id]))
        .await
        .unwrap();

    assert_eq!(created.url.short_code, "book");
    assert_eq!(created.url.click_count, 0);
    assert!(created.url.last_clicked_at.is_none());
    // 重复 ID 去重，分类按名称排序
    let names: Vec<_> = created.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "rust"]);

    let loaded = storage
        .find_url_with_categories(created.url.id)
        .await
        .unwrap()
        .expect("url should exist");
    assert_eq!(loaded.categories.len(), 2);
}

#[tokio::test]
async fn test_duplicate_short_code_is_conflict() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    storage.insert_url(new_url("dup", vec![])).await.unwrap();
    let err = storage.insert_url(new_url("dup", vec![])).await.unwrap_err();
    assert!(matches!(err, LinkshelfError::Conflict(_)), "got {:?}", err);
    assert_eq!(storage.count_urls().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_category_rejected_without_insert() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let err = storage
        .insert_url(new_url("orphan", vec![9999]))
        .await
        .unwrap_err();
    assert!(matches!(err, LinkshelfError::InvalidInput(_)), "got {:?}", err);
    assert!(storage.find_url_by_code("orphan").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_category_is_conflict() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    storage.insert_category("news").await.unwrap();
    let err = storage.insert_category("news").await.unwrap_err();
    assert!(matches!(err, LinkshelfError::Conflict(_)));
}

#[tokio::test]
async fn test_categories_listed_alphabetically_with_counts() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let zeta = storage.insert_category("zeta").await.unwrap();
    let alpha = storage.insert_category("alpha").await.unwrap();
    storage.insert_category("mid").await.unwrap();

    storage
        .insert_url(new_url("one", vec![zeta.id, alpha.id]))
        .await
        .unwrap();
    storage.insert_url(new_url("two", vec![zeta.id])).await.unwrap();

    let listed = storage.list_categories_with_counts().await.unwrap();
    let summary: Vec<_> = listed
        .iter()
        .map(|c| (c.category.name.as_str(), c.url_count))
        .collect();
    assert_eq!(summary, vec![("alpha", 1), ("mid", 0), ("zeta", 2)]);
}

#[tokio::test]
async fn test_category_with_urls() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let cat = storage.insert_category("tools").await.unwrap();
    storage.insert_url(new_url("a", vec![cat.id])).await.unwrap();
    storage.insert_url(new_url("b", vec![])).await.unwrap();

    let detail = storage
        .find_category_with_urls(cat.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.urls.len(), 1);
    assert_eq!(detail.urls[0].short_code, "a");

    assert!(storage.find_category_with_urls(4242).await.unwrap().is_none());
}

#[tokio::test]
async fn test_increment_url_click_sets_timestamp() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let created = storage.insert_url(new_url("tick", vec![])).await.unwrap();
    let now = Utc::now();

    assert!(storage.increment_url_click(created.url.id, now).await.unwrap());
    assert!(storage.increment_url_click(created.url.id, now).await.unwrap());
    assert!(!storage.increment_url_click(987654, now).await.unwrap());

    let url = storage.find_url_by_id(created.url.id).await.unwrap().unwrap();
    assert_eq!(url.click_count, 2);
    let clicked = url.last_clicked_at.expect("timestamp recorded");
    assert!((clicked - now).num_seconds().abs() <= 1);
}

#[tokio::test]
async fn test_sessions_expire_and_purge() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let user = storage.upsert_user("ops@example.com", None).await.unwrap();
    assert_eq!(user.name, "ops");

    let now = Utc::now();
    storage
        .create_session("live", user.id, now + Duration::days(1))
        .await
        .unwrap();
    storage
        .create_session("stale", user.id, now - Duration::minutes(1))
        .await
        .unwrap();

    assert!(storage.find_valid_session("live", now).await.unwrap().is_some());
    assert!(storage.find_valid_session("stale", now).await.unwrap().is_none());
    assert!(storage.find_valid_session("missing", now).await.unwrap().is_none());

    assert_eq!(storage.purge_expired_sessions(now).await.unwrap(), 1);
    assert!(storage.delete_session("live").await.unwrap());
    assert!(!storage.delete_session("live").await.unwrap());
}

#[tokio::test]
async fn test_upsert_user_is_idempotent_by_email() {
    let env = common::setup().await;
    let storage = &env.ctx.storage;

    let first = storage
        .upsert_user("dev@example.com", Some("Dev"))
        .await
        .unwrap();
    let again = storage.upsert_user("dev@example.com", None).await.unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(again.name, "Dev");

    let renamed = storage
        .upsert_user("dev@example.com", Some("Developer"))
        .await
        .unwrap();
    assert_eq!(renamed.id, first.id);
    assert_eq!(renamed.name, "Developer");
}

#[tokio::test]
async fn test_ping() {
    let env = common::setup().await;
    env.ctx.storage.ping().await.unwrap();
    assert_eq!(env.ctx.storage.get_backend_config().storage_type, "sqlite");
}
