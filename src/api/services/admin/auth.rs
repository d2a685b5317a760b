//! Admin API 认证相关端点

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, info, warn};

use crate::api::constants;
use crate::errors::{LinkshelfError, Result};
use crate::services::{AuthService, AuthenticatedUser};

use super::helpers::{CookieBuilder, success_response};
use super::types::{LoginRequest, LoginResponse, RefreshResponse, ValidateOrdered};

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name).map(|c| c.value().to_string())
}

fn with_cookies(mut resp: HttpResponse, cookies: &[Cookie<'static>]) -> Result<HttpResponse> {
    for cookie in cookies {
        resp.add_cookie(cookie)
            .map_err(|e| LinkshelfError::internal(format!("Failed to set cookie: {}", e)))?;
    }
    Ok(resp)
}

/// POST /auth/login
pub async fn login(
    body: web::Json<LoginRequest>,
    auth: web::Data<Arc<AuthService>>,
    cookies: web::Data<CookieBuilder>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    body.validate_ordered()?;

    let outcome = auth
        .login(&body.email, &body.password, body.name.as_deref())
        .await?;

    info!("Admin login successful: {}", outcome.user.email);
    with_cookies(
        success_response(LoginResponse {
            user: outcome.user,
            session_expires_at: outcome.session_expires_at,
        }),
        &[
            cookies.build_session_cookie(outcome.session_token),
            cookies.build_auth_cookie(outcome.auth_token),
        ],
    )
}

/// POST /auth/logout
///
/// 无论会话是否存在都返回 200。
pub async fn logout(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    cookies: web::Data<CookieBuilder>,
) -> Result<HttpResponse> {
    let session_token = cookie_value(&req, constants::SESSION_COOKIE_NAME);
    if let Err(e) = auth.logout(session_token.as_deref()).await {
        warn!("Failed to remove session on logout: {}", e);
    }

    debug!("Logout processed");
    with_cookies(
        success_response(serde_json::json!({ "loggedOut": true })),
        &[
            cookies.build_expired_session_cookie(),
            cookies.build_expired_auth_cookie(),
        ],
    )
}

/// GET /auth/me
pub async fn me(user: web::ReqData<AuthenticatedUser>) -> HttpResponse {
    success_response(user.into_inner())
}

/// POST /auth/refresh
///
/// 重新校验两项凭证，签发新的 authToken；会话不变。
pub async fn refresh(
    req: HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    cookies: web::Data<CookieBuilder>,
) -> Result<HttpResponse> {
    let session_token = cookie_value(&req, constants::SESSION_COOKIE_NAME);
    let auth_token = cookie_value(&req, constants::AUTH_COOKIE_NAME);

    let outcome = auth
        .refresh(session_token.as_deref(), auth_token.as_deref())
        .await?;

    with_cookies(
        success_response(RefreshResponse {
            user: outcome.user,
            expires_at: outcome.claims.exp,
        }),
        &[cookies.build_auth_cookie(outcome.auth_token)],
    )
}
