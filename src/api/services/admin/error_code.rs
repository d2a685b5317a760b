//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkshelfError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接 / 分类错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    MissingParameter = 1002,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    TokenInvalid = 2002,
    SessionInvalid = 2005,

    // 链接 / 分类错误 3000-3099
    Conflict = 3001,
}

impl From<&LinkshelfError> for ErrorCode {
    fn from(err: &LinkshelfError) -> Self {
        match err {
            LinkshelfError::Unauthorized(_) => ErrorCode::Unauthorized,
            LinkshelfError::InvalidToken(_) => ErrorCode::TokenInvalid,
            LinkshelfError::InvalidOrExpiredSession(_) => ErrorCode::SessionInvalid,
            LinkshelfError::NotFound(_) => ErrorCode::NotFound,
            LinkshelfError::MissingParameter(_) => ErrorCode::MissingParameter,
            LinkshelfError::InvalidInput(_) => ErrorCode::BadRequest,
            LinkshelfError::Conflict(_) => ErrorCode::Conflict,
            LinkshelfError::Internal(_)
            | LinkshelfError::DatabaseConfig(_)
            | LinkshelfError::DatabaseConnection(_)
            | LinkshelfError::DatabaseOperation(_)
            | LinkshelfError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(serde_json::to_string(&ErrorCode::Conflict).unwrap(), "3001");
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ErrorCode::from(&LinkshelfError::invalid_token("x")),
            ErrorCode::TokenInvalid
        );
        assert_eq!(
            ErrorCode::from(&LinkshelfError::database_operation("x")),
            ErrorCode::InternalServerError
        );
    }
}
