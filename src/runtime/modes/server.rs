//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::AdminAuth;
use crate::api::services::admin::{json_config, path_config, routes::api_routes};
use crate::api::services::{health_routes, redirect_routes};
use crate::config::StaticConfig;
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;

/// 注册共享状态与全部路由
///
/// 顺序：API scope、健康检查、最后是通配的跳转路由。
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext) {
    let api_prefix = ctx.route_config.api_prefix.clone();
    let health_prefix = ctx.route_config.health_prefix.clone();

    cfg.app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.auth_service.clone()))
        .app_data(web::Data::new(ctx.url_service.clone()))
        .app_data(web::Data::new(ctx.category_service.clone()))
        .app_data(web::Data::new(ctx.redirect_resolver.clone()))
        .app_data(web::Data::new(ctx.cookies.clone()))
        .app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope(&api_prefix)
                .wrap(AdminAuth::new(api_prefix.clone()))
                .configure(api_routes),
        )
        .service(web::scope(&health_prefix).service(health_routes()))
        .service(redirect_routes());
}

pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let ctx = lifetime::startup::prepare_server_startup(config).await?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let db_for_shutdown = ctx.storage.get_db().clone();

    let server = HttpServer::new(move || {
        let ctx = ctx.clone();
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .configure(move |cfg| configure_app(cfg, &ctx))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();

    // 等待服务结束或关闭信号
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
