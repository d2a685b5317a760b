//! Admin API 服务模块
//!
//! - 认证（登录、登出、身份查询、token 刷新）
//! - 短链接 CRUD
//! - 分类 CRUD

pub mod auth;
mod category_crud;
pub mod error_code;
mod helpers;
pub mod routes;
mod types;
mod url_crud;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    CookieBuilder, created_response, error_from_linkshelf, error_response, json_config,
    json_response, path_config, success_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use category_crud::{create_category, get_category, list_categories};
pub use url_crud::{create_url, get_url, list_urls};
