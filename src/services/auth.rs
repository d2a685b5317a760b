//! Session + token authentication
//!
//! A request is authenticated only when BOTH the signed auth token and the
//! server-side session record are valid and belong to the same user.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::jwt::{AuthClaims, JwtService};
use crate::config::AuthConfig;
use crate::errors::{LinkshelfError, Result};
use crate::storage::{SeaOrmStorage, User};
use crate::utils::generate_secure_token;
use crate::utils::password::verify_admin_password;

/// 通过认证的身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: AuthenticatedUser,
    pub session_token: String,
    pub session_expires_at: DateTime<Utc>,
    pub auth_token: String,
}

/// 刷新结果
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub user: AuthenticatedUser,
    pub auth_token: String,
    pub claims: AuthClaims,
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
    jwt: Arc<JwtService>,
    admin_password: String,
    session_days: u64,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>, jwt: Arc<JwtService>, auth: &AuthConfig) -> Self {
        Self {
            storage,
            jwt,
            admin_password: auth.admin_password.clone(),
            session_days: auth.session_days,
        }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// 校验 cookie 对，返回身份与 token claims
    pub async fn authenticate_with_claims(
        &self,
        session_token: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<(AuthenticatedUser, AuthClaims)> {
        let (Some(session_token), Some(auth_token)) = (
            session_token.filter(|s| !s.is_empty()),
            auth_token.filter(|s| !s.is_empty()),
        ) else {
            return Err(LinkshelfError::unauthorized("Missing session or auth token"));
        };

        let claims = self.jwt.validate(auth_token)?;
        let token_user_id = claims.user_id()?;

        let session = self
            .storage
            .find_valid_session(session_token, Utc::now())
            .await?
            .ok_or_else(|| LinkshelfError::invalid_or_expired_session("Session not found or expired"))?;

        if session.user_id != token_user_id {
            warn!(
                "Session user {} does not match token subject {}",
                session.user_id, token_user_id
            );
            return Err(LinkshelfError::invalid_or_expired_session(
                "Session does not belong to token subject",
            ));
        }

        let user = self
            .storage
            .find_user(session.user_id)
            .await?
            .ok_or_else(|| LinkshelfError::invalid_or_expired_session("Session user no longer exists"))?;

        Ok((user.into(), claims))
    }

    pub async fn authenticate(
        &self,
        session_token: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<AuthenticatedUser> {
        self.authenticate_with_claims(session_token, auth_token)
            .await
            .map(|(user, _)| user)
    }

    /// 重新校验两项凭证后签发新 token，会话记录保持不变
    pub async fn refresh(
        &self,
        session_token: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<RefreshOutcome> {
        let (user, claims) = self
            .authenticate_with_claims(session_token, auth_token)
            .await?;
        let (auth_token, claims) = self.jwt.reissue(&claims)?;

        debug!("Auth token refreshed for user {}", user.id);
        Ok(RefreshOutcome {
            user,
            auth_token,
            claims,
        })
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<LoginOutcome> {
        let valid = verify_admin_password(password, &self.admin_password).map_err(|e| {
            LinkshelfError::internal(format!("Configured admin password is unusable: {}", e))
        })?;
        if !valid {
            info!("Login failed for {}: invalid credentials", email);
            return Err(LinkshelfError::unauthorized("Invalid credentials"));
        }

        let now = Utc::now();
        let session_expires_at = i64::try_from(self.session_days)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                LinkshelfError::internal(format!(
                    "Session lifetime out of range: {} days",
                    self.session_days
                ))
            })?;

        let user = self.storage.upsert_user(email, name).await?;
        self.storage.purge_expired_sessions(now).await?;

        let session_token = generate_secure_token();
        self.storage
            .create_session(&session_token, user.id, session_expires_at)
            .await?;

        let (auth_token, _) = self.jwt.issue(user.id, &user.email)?;

        info!("User {} logged in", user.email);
        Ok(LoginOutcome {
            user: user.into(),
            session_token,
            session_expires_at,
            auth_token,
        })
    }

    /// 删除会话（不存在也视为成功）
    pub async fn logout(&self, session_token: Option<&str>) -> Result<()> {
        if let Some(token) = session_token.filter(|s| !s.is_empty())
            && self.storage.delete_session(token).await?
        {
            debug!("Session removed on logout");
        }
        Ok(())
    }
}
