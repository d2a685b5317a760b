//! Shared integration test setup
//!
//! Every test gets its own temporary SQLite database.

#![allow(dead_code, unused_macros)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use tempfile::TempDir;

use linkshelf::config::StaticConfig;
use linkshelf::runtime::lifetime::startup::StartupContext;
use linkshelf::storage::StorageFactory;

pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_EMAIL: &str = "admin@example.com";

pub struct TestEnv {
    // 持有临时目录，测试结束时删除
    _dir: TempDir,
    pub config: StaticConfig,
    pub ctx: StartupContext,
}

pub fn test_config(db_url: &str) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.database.database_url = db_url.to_string();
    config.database.pool_size = 5;
    config.auth.admin_password = ADMIN_PASSWORD.to_string();
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config
}

pub async fn setup() -> TestEnv {
    setup_with(|_| {}).await
}

/// 在默认测试配置上做调整后初始化
pub async fn setup_with(adjust: impl FnOnce(&mut StaticConfig)) -> TestEnv {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("linkshelf_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let mut config = test_config(&db_url);
    adjust(&mut config);
    let storage = StorageFactory::create(&config.database)
        .await
        .expect("Failed to create storage");
    let ctx = StartupContext::from_storage(storage, &config);

    TestEnv {
        _dir: dir,
        config,
        ctx,
    }
}

/// 从响应中取出指定 cookie
pub fn response_cookie<B: MessageBody>(
    resp: &ServiceResponse<B>,
    name: &str,
) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

/// 以管理员身份登录，返回 (sessionToken, authToken) cookie
macro_rules! login_cookies {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": common::ADMIN_EMAIL,
                "password": common::ADMIN_PASSWORD,
                "name": "Admin"
            }))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let session =
            common::response_cookie(&resp, "sessionToken").expect("missing session cookie");
        let auth = common::response_cookie(&resp, "authToken").expect("missing auth cookie");
        (session, auth)
    }};
}
