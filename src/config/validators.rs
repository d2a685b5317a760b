//! 启动时配置校验
//!
//! 服务启动前必须满足：数据库 URL、管理员密码、JWT 密钥均已配置，
//! 且 JWT 密钥长度不低于 [`MIN_JWT_SECRET_LEN`]。

use super::StaticConfig;

/// JWT 密钥最小长度（字节）
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// auth token 有效期上限（一年）
pub const MAX_TOKEN_MINUTES: u64 = 525_600;
/// 会话与 cookie 有效期上限（十年）
pub const MAX_SESSION_DAYS: u64 = 3650;
pub const MAX_COOKIE_MAX_AGE_DAYS: u64 = 3650;

fn check_range(problems: &mut Vec<String>, key: &str, value: u64, max: u64) {
    if value == 0 || value > max {
        problems.push(format!("{} must be between 1 and {} (got {})", key, max, value));
    }
}

/// 校验配置，返回所有不合法项
pub fn validate_static_config(config: &StaticConfig) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if config.database.database_url.trim().is_empty() {
        problems.push("database.database_url must not be empty".to_string());
    }

    if config.auth.admin_password.is_empty() {
        problems.push("auth.admin_password must be set".to_string());
    }

    if config.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        problems.push(format!(
            "auth.jwt_secret must be at least {} bytes (got {})",
            MIN_JWT_SECRET_LEN,
            config.auth.jwt_secret.len()
        ));
    }

    check_range(
        &mut problems,
        "auth.token_minutes",
        config.auth.token_minutes,
        MAX_TOKEN_MINUTES,
    );
    check_range(
        &mut problems,
        "auth.session_days",
        config.auth.session_days,
        MAX_SESSION_DAYS,
    );
    check_range(
        &mut problems,
        "auth.cookie_max_age_days",
        config.auth.cookie_max_age_days,
        MAX_COOKIE_MAX_AGE_DAYS,
    );

    if !config.routes.api_prefix.starts_with('/') {
        problems.push(format!(
            "routes.api_prefix must start with '/' (got '{}')",
            config.routes.api_prefix
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> StaticConfig {
        let mut config = StaticConfig::default();
        config.auth.admin_password = "hunter2".to_string();
        config.auth.jwt_secret = "0123456789abcdef0123456789abcdef".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_static_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = "too-short".to_string();
        let problems = validate_static_config(&config).unwrap_err();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("jwt_secret"));
    }

    #[test]
    fn test_defaults_report_every_missing_secret() {
        let problems = validate_static_config(&StaticConfig::default()).unwrap_err();
        assert!(problems.iter().any(|p| p.contains("admin_password")));
        assert!(problems.iter().any(|p| p.contains("jwt_secret")));
    }

    #[test]
    fn test_api_prefix_must_be_absolute() {
        let mut config = valid_config();
        config.routes.api_prefix = "api".to_string();
        assert!(validate_static_config(&config).is_err());
    }

    #[test]
    fn test_token_minutes_bounds() {
        let mut config = valid_config();
        config.auth.token_minutes = 0;
        assert!(validate_static_config(&config).unwrap_err()[0].contains("auth.token_minutes"));

        config.auth.token_minutes = MAX_TOKEN_MINUTES + 1;
        assert!(validate_static_config(&config).unwrap_err()[0].contains("auth.token_minutes"));

        config.auth.token_minutes = MAX_TOKEN_MINUTES;
        assert!(validate_static_config(&config).is_ok());
    }

    #[test]
    fn test_session_days_bounds() {
        let mut config = valid_config();
        config.auth.session_days = 1_000_000_000_000;
        let problems = validate_static_config(&config).unwrap_err();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("auth.session_days"));

        config.auth.session_days = 0;
        assert!(validate_static_config(&config).is_err());

        config.auth.session_days = MAX_SESSION_DAYS;
        assert!(validate_static_config(&config).is_ok());
    }

    #[test]
    fn test_cookie_max_age_bounds() {
        let mut config = valid_config();
        config.auth.cookie_max_age_days = 0;
        let problems = validate_static_config(&config).unwrap_err();
        assert!(problems[0].contains("auth.cookie_max_age_days"));

        config.auth.cookie_max_age_days = MAX_COOKIE_MAX_AGE_DAYS + 1;
        assert!(validate_static_config(&config).is_err());

        config.auth.cookie_max_age_days = 1;
        assert!(validate_static_config(&config).is_ok());
    }
}
