//! Admin API 帮助函数

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error::InternalError, web};
use serde::Serialize;
use tracing::error;

use crate::api::constants;
use crate::config::{AuthConfig, MAX_COOKIE_MAX_AGE_DAYS, SameSitePolicy};
use crate::errors::LinkshelfError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 Created 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkshelfError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 内部错误只记录日志，对外返回通用信息。
pub fn error_from_linkshelf(err: &LinkshelfError) -> HttpResponse {
    if err.is_internal() {
        error!("{}", err.format_simple());
    }
    error_response(err.http_status(), ErrorCode::from(err), err.public_message())
}

impl ResponseError for LinkshelfError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_from_linkshelf(self)
    }
}

/// JSON 解析失败统一映射为 InvalidInput
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let mapped = LinkshelfError::invalid_input(format!("Invalid request body: {}", err));
        InternalError::from_response(err, error_from_linkshelf(&mapped)).into()
    })
}

/// 路径参数解析失败统一映射为 InvalidInput
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        let mapped = LinkshelfError::invalid_input(format!("Invalid path parameter: {}", err));
        InternalError::from_response(err, error_from_linkshelf(&mapped)).into()
    })
}

/// Cookie 构建器
///
/// 两个 cookie 都是 HttpOnly、path `/`，生产环境带 Secure。
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    domain: Option<String>,
    max_age: CookieDuration,
}

impl CookieBuilder {
    pub fn new(auth: &AuthConfig) -> Self {
        let same_site = match auth.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: auth.production,
            domain: auth.cookie_domain.clone(),
            // 上限与启动校验一致
            max_age: CookieDuration::days(
                auth.cookie_max_age_days.min(MAX_COOKIE_MAX_AGE_DAYS) as i64,
            ),
        }
    }

    fn build_cookie_base(&self, name: &str, value: String, max_age: CookieDuration) -> Cookie<'static> {
        let mut cookie = Cookie::new(name.to_string(), value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::SESSION_COOKIE_NAME,
            token,
            self.max_age,
        )
    }

    pub fn build_auth_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::AUTH_COOKIE_NAME,
            token,
            self.max_age,
        )
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(constants::SESSION_COOKIE_NAME, String::new(), CookieDuration::ZERO)
    }

    pub fn build_expired_auth_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(constants::AUTH_COOKIE_NAME, String::new(), CookieDuration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let builder = CookieBuilder::new(&AuthConfig::default());
        let cookie = builder.build_auth_cookie("tok".to_string());

        assert_eq!(cookie.name(), "authToken");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(7)));
    }

    #[test]
    fn test_secure_in_production() {
        let auth = AuthConfig {
            production: true,
            ..AuthConfig::default()
        };
        let cookie = CookieBuilder::new(&auth).build_session_cookie("s".to_string());
        assert_eq!(cookie.name(), "sessionToken");
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_max_age_is_clamped() {
        let auth = AuthConfig {
            cookie_max_age_days: u64::MAX,
            ..AuthConfig::default()
        };
        let cookie = CookieBuilder::new(&auth).build_auth_cookie("t".to_string());
        assert_eq!(
            cookie.max_age(),
            Some(CookieDuration::days(MAX_COOKIE_MAX_AGE_DAYS as i64))
        );
    }

    #[test]
    fn test_expired_cookies() {
        let builder = CookieBuilder::new(&AuthConfig::default());
        assert_eq!(
            builder.build_expired_auth_cookie().max_age(),
            Some(CookieDuration::ZERO)
        );
        assert_eq!(builder.build_expired_session_cookie().value(), "");
    }

    #[test]
    fn test_internal_error_is_masked() {
        let resp = error_from_linkshelf(&LinkshelfError::database_operation("secret detail"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
