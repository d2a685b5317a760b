//! 目标 URL 与短码校验
//!
//! 目标 URL 只允许 http/https；短码只允许 `[A-Za-z0-9_-]`。

use url::Url;

pub const MAX_TARGET_URL_LEN: usize = 2048;
pub const MAX_SHORT_CODE_LEN: usize = 64;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    TooLong(usize),
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for UrlValidationError {}

impl UrlValidationError {
    /// 面向调用方的提示信息
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyUrl => "Target URL is required",
            Self::TooLong(_) => "Target URL must be at most 2048 characters",
            Self::InvalidProtocol(_) => "Target URL must start with http:// or https://",
            Self::DangerousProtocol(_) => "This URL protocol is not allowed",
            Self::InvalidFormat(_) => "Target URL is not a valid URL",
        }
    }
}

const DANGEROUS_PROTOCOLS: &[&str] = &["javascript:", "data:", "file:", "vbscript:", "blob:"];

/// 校验跳转目标
pub fn validate_target_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }
    if url.chars().count() > MAX_TARGET_URL_LEN {
        return Err(UrlValidationError::TooLong(url.chars().count()));
    }

    let lower = url.to_ascii_lowercase();
    if let Some(proto) = DANGEROUS_PROTOCOLS.iter().find(|p| lower.starts_with(**p)) {
        return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(())
}

/// 校验短码，返回第一条错误提示
///
/// 纯数字短码会被按 ID 查找遮蔽，因此拒绝。
pub fn validate_short_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Short code is required");
    }
    if code.chars().count() > MAX_SHORT_CODE_LEN {
        return Err("Short code must be at most 64 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("Short code may only contain letters, digits, '-' and '_'");
    }
    if code.parse::<i64>().is_ok() || code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Short code must not be purely numeric");
    }
    Ok(())
}
