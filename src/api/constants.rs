//! API 模块常量定义

/// 会话 Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "sessionToken";

/// Auth Token Cookie 名称
pub const AUTH_COOKIE_NAME: &str = "authToken";
