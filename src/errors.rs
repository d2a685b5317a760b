use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkshelfError {
    Unauthorized(String),
    InvalidToken(String),
    InvalidOrExpiredSession(String),
    NotFound(String),
    MissingParameter(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
}

impl LinkshelfError {
    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkshelfError::Unauthorized(_) => "Unauthorized",
            LinkshelfError::InvalidToken(_) => "Invalid Token",
            LinkshelfError::InvalidOrExpiredSession(_) => "Invalid Or Expired Session",
            LinkshelfError::NotFound(_) => "Resource Not Found",
            LinkshelfError::MissingParameter(_) => "Missing Parameter",
            LinkshelfError::InvalidInput(_) => "Invalid Input",
            LinkshelfError::Conflict(_) => "Conflict",
            LinkshelfError::Internal(_) => "Internal Error",
            LinkshelfError::DatabaseConfig(_) => "Database Configuration Error",
            LinkshelfError::DatabaseConnection(_) => "Database Connection Error",
            LinkshelfError::DatabaseOperation(_) => "Database Operation Error",
            LinkshelfError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkshelfError::Unauthorized(msg)
            | LinkshelfError::InvalidToken(msg)
            | LinkshelfError::InvalidOrExpiredSession(msg)
            | LinkshelfError::NotFound(msg)
            | LinkshelfError::MissingParameter(msg)
            | LinkshelfError::InvalidInput(msg)
            | LinkshelfError::Conflict(msg)
            | LinkshelfError::Internal(msg)
            | LinkshelfError::DatabaseConfig(msg)
            | LinkshelfError::DatabaseConnection(msg)
            | LinkshelfError::DatabaseOperation(msg)
            | LinkshelfError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkshelfError::Unauthorized(_)
            | LinkshelfError::InvalidToken(_)
            | LinkshelfError::InvalidOrExpiredSession(_) => StatusCode::UNAUTHORIZED,
            LinkshelfError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkshelfError::MissingParameter(_) | LinkshelfError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            LinkshelfError::Conflict(_) => StatusCode::CONFLICT,
            LinkshelfError::Internal(_)
            | LinkshelfError::DatabaseConfig(_)
            | LinkshelfError::DatabaseConnection(_)
            | LinkshelfError::DatabaseOperation(_)
            | LinkshelfError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否属于内部错误（对外只返回通用信息，不泄露细节）
    pub fn is_internal(&self) -> bool {
        self.http_status() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 对外展示的消息
    pub fn public_message(&self) -> &str {
        if self.is_internal() {
            "Internal server error"
        } else {
            self.message()
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkshelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkshelfError {}

// 便捷的构造函数
impl LinkshelfError {
    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::Unauthorized(msg.into())
    }

    pub fn invalid_token<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::InvalidToken(msg.into())
    }

    pub fn invalid_or_expired_session<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::InvalidOrExpiredSession(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::NotFound(msg.into())
    }

    pub fn missing_parameter<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::MissingParameter(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::InvalidInput(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::Conflict(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::Internal(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkshelfError::DatabaseOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkshelfError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkshelfError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkshelfError {
    fn from(err: std::io::Error) -> Self {
        LinkshelfError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for LinkshelfError {
    fn from(err: serde_json::Error) -> Self {
        LinkshelfError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for LinkshelfError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        LinkshelfError::InvalidToken(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkshelfError>;
