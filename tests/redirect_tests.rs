//! Redirect resolution and click accounting tests

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use futures_util::future::join_all;

use linkshelf::errors::LinkshelfError;
use linkshelf::runtime::modes::configure_app;
use linkshelf::services::RedirectResolver;
use linkshelf::storage::NewShortUrl;

fn new_url(code: &str, target: &str, category_ids: Vec<i64>) -> NewShortUrl {
    NewShortUrl {
        short_code: code.to_string(),
        target_url: target.to_string(),
        category_ids,
    }
}

#[actix_rt::test]
async fn test_redirect_by_code_and_id() {
    let env = common::setup().await;
    let created = env
        .ctx
        .storage
        .insert_url(new_url("docs", "https://example.com/docs", vec![]))
        .await
        .unwrap();

    let ctx = env.ctx.clone();
    let app = test::init_service(App::new().configure(move |cfg| configure_app(cfg, &ctx))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/docs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/docs"
    );

    let by_id = format!("/{}", created.url.id);
    let resp = test::call_service(&app, TestRequest::get().uri(&by_id).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/docs"
    );

    let url = env
        .ctx
        .storage
        .find_url_by_id(created.url.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(url.click_count, 2);
    assert!(url.last_clicked_at.is_some());
}

#[actix_rt::test]
async fn test_unknown_code_is_404_without_side_effects() {
    let env = common::setup().await;
    let created = env
        .ctx
        .storage
        .insert_url(new_url("exists", "https://example.com", vec![]))
        .await
        .unwrap();

    let ctx = env.ctx.clone();
    let app = test::init_service(App::new().configure(move |cfg| configure_app(cfg, &ctx))).await;

    for uri in ["/missing", "/424242"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1004);
    }

    let url = env
        .ctx
        .storage
        .find_url_by_id(created.url.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(url.click_count, 0);
}

#[actix_rt::test]
async fn test_empty_code_is_bad_request() {
    let env = common::setup().await;
    let ctx = env.ctx.clone();
    let app = test::init_service(App::new().configure(move |cfg| configure_app(cfg, &ctx))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1002);
}

#[actix_rt::test]
async fn test_click_fans_out_to_every_category() {
    let env = common::setup().await;
    let storage = env.ctx.storage.clone();

    let a = storage.insert_category("a").await.unwrap();
    let b = storage.insert_category("b").await.unwrap();
    let untouched = storage.insert_category("c").await.unwrap();

    storage
        .insert_url(new_url("multi", "https://example.com/m", vec![a.id, b.id]))
        .await
        .unwrap();
    storage
        .insert_url(new_url("other", "https://example.com/o", vec![untouched.id]))
        .await
        .unwrap();

    let resolver = RedirectResolver::new(storage.clone());
    for _ in 0..3 {
        assert_eq!(
            resolver.resolve("multi").await.unwrap(),
            "https://example.com/m"
        );
    }

    let counts: Vec<_> = storage
        .list_categories_with_counts()
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.category.name, c.category.click_count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("a".to_string(), 3),
            ("b".to_string(), 3),
            ("c".to_string(), 0)
        ]
    );
}

#[actix_rt::test]
async fn test_concurrent_redirects_are_all_counted() {
    let env = common::setup().await;
    let storage = env.ctx.storage.clone();

    let cat = storage.insert_category("hot").await.unwrap();
    let created = storage
        .insert_url(new_url("busy", "https://example.com/busy", vec![cat.id]))
        .await
        .unwrap();

    let resolver = Arc::new(RedirectResolver::new(storage.clone()));
    let results = join_all((0..20).map(|_| {
        let resolver = resolver.clone();
        async move { resolver.resolve("busy").await }
    }))
    .await;
    assert!(results.iter().all(|r| r.is_ok()));

    let url = storage.find_url_by_id(created.url.id).await.unwrap().unwrap();
    assert_eq!(url.click_count, 20);

    let detail = storage.find_category_with_urls(cat.id).await.unwrap().unwrap();
    assert_eq!(detail.category.click_count, 20);
}

#[actix_rt::test]
async fn test_resolver_errors() {
    let env = common::setup().await;
    let resolver = RedirectResolver::new(env.ctx.storage.clone());

    assert!(matches!(
        resolver.resolve("").await,
        Err(LinkshelfError::MissingParameter(_))
    ));
    assert!(matches!(
        resolver.resolve("nope").await,
        Err(LinkshelfError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn test_last_clicked_at_advances_on_each_resolution() {
    let env = common::setup().await;
    let storage = env.ctx.storage.clone();
    let created = storage
        .insert_url(new_url("ticker", "https://example.com/t", vec![]))
        .await
        .unwrap();
    let resolver = RedirectResolver::new(storage.clone());

    resolver.resolve("ticker").await.unwrap();
    let first = storage
        .find_url_by_id(created.url.id)
        .await
        .unwrap()
        .unwrap()
        .last_clicked_at
        .expect("first click recorded");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    resolver.resolve("ticker").await.unwrap();
    let url = storage.find_url_by_id(created.url.id).await.unwrap().unwrap();
    let second = url.last_clicked_at.expect("second click recorded");

    assert_eq!(url.click_count, 2);
    assert!(second > first, "{} should be after {}", second, first);
}

#[actix_rt::test]
async fn test_head_redirects_without_counting() {
    let env = common::setup().await;
    let cat = env.ctx.storage.insert_category("preview").await.unwrap();
    let created = env
        .ctx
        .storage
        .insert_url(new_url("peek", "https://example.com/p", vec![cat.id]))
        .await
        .unwrap();

    let ctx = env.ctx.clone();
    let app = test::init_service(App::new().configure(move |cfg| configure_app(cfg, &ctx))).await;

    let resp = test::call_service(
        &app,
        TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri("/peek")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get("Location").unwrap(), "https://example.com/p");

    let resp = test::call_service(
        &app,
        TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri("/nothing-here")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let url = env
        .ctx
        .storage
        .find_url_by_id(created.url.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(url.click_count, 0);
    assert!(url.last_clicked_at.is_none());

    let detail = env
        .ctx
        .storage
        .find_category_with_urls(cat.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.category.click_count, 0);
}
