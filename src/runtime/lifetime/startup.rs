use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::jwt::JwtService;
use crate::api::services::admin::CookieBuilder;
use crate::config::StaticConfig;
use crate::services::{AuthService, CategoryService, RedirectResolver, UrlService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的共享对象，启动时构造一次，注入到每个 worker
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub auth_service: Arc<AuthService>,
    pub url_service: Arc<UrlService>,
    pub category_service: Arc<CategoryService>,
    pub redirect_resolver: Arc<RedirectResolver>,
    pub cookies: CookieBuilder,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub api_prefix: String,
    pub health_prefix: String,
}

impl StartupContext {
    /// 基于已初始化的存储组装各个服务
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let jwt = Arc::new(JwtService::new(
            &config.auth.jwt_secret,
            config.auth.token_minutes,
        ));

        Self {
            auth_service: Arc::new(AuthService::new(storage.clone(), jwt, &config.auth)),
            url_service: Arc::new(UrlService::new(storage.clone())),
            category_service: Arc::new(CategoryService::new(storage.clone())),
            redirect_resolver: Arc::new(RedirectResolver::new(storage.clone())),
            cookies: CookieBuilder::new(&config.auth),
            route_config: RouteConfig {
                api_prefix: config.routes.api_prefix.clone(),
                health_prefix: config.routes.health_prefix.clone(),
            },
            storage,
        }
    }
}

/// 准备服务器启动的上下文：连接数据库、运行迁移并构造服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let context = StartupContext::from_storage(storage, config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
