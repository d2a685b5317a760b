//! Admin API 路由配置

use actix_web::web;

use super::auth::{login, logout, me, refresh};
use super::category_crud::{create_category, get_category, list_categories};
use super::url_crud::{create_url, get_url, list_urls};
use crate::api::services::analytics::AnalyticsService;

/// 认证路由 `/auth`
///
/// - POST /auth/login - 登录
/// - POST /auth/logout - 登出
/// - GET /auth/me - 当前身份
/// - POST /auth/refresh - 刷新 authToken
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me))
        .route("/refresh", web::post().to(refresh))
}

/// 短链接路由 `/urls`
pub fn urls_routes() -> actix_web::Scope {
    web::scope("/urls")
        .route("", web::get().to(list_urls))
        .route("", web::post().to(create_url))
        .route("/{id}", web::get().to(get_url))
}

/// 分类路由 `/categories`
pub fn categories_routes() -> actix_web::Scope {
    web::scope("/categories")
        .route("", web::get().to(list_categories))
        .route("", web::post().to(create_category))
        .route("/{id}", web::get().to(get_category))
}

/// API 路由，组合所有子模块
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth_routes())
        .service(urls_routes())
        .service(categories_routes())
        .route("/analytics", web::post().to(AnalyticsService::ingest));
}
