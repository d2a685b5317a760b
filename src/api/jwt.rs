use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{LinkshelfError, Result};

pub const AUTH_TOKEN_TYPE: &str = "auth";

/// Auth Token Claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// 用户 ID
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

impl AuthClaims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| LinkshelfError::invalid_token("Token subject is not a user id"))
    }
}

/// JWT Service for issuing and validating auth tokens
///
/// Constructed once at startup and shared through `web::Data`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_minutes,
        }
    }

    pub fn token_minutes(&self) -> u64 {
        self.token_minutes
    }

    /// `now + token_minutes` 的时间戳，越界返回内部错误
    fn expiry_after(&self, now: DateTime<Utc>) -> Result<i64> {
        i64::try_from(self.token_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .map(|exp| exp.timestamp())
            .ok_or_else(|| {
                LinkshelfError::internal(format!(
                    "Token lifetime out of range: {} minutes",
                    self.token_minutes
                ))
            })
    }

    fn encode_claims(&self, claims: &AuthClaims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| LinkshelfError::internal(format!("Failed to sign token: {}", e)))
    }

    /// 为用户签发新的 Auth Token
    pub fn issue(&self, user_id: i64, email: &str) -> Result<(String, AuthClaims)> {
        let now = Utc::now();
        let claims = AuthClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: self.expiry_after(now)?,
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: AUTH_TOKEN_TYPE.to_string(),
        };

        let token = self.encode_claims(&claims)?;
        Ok((token, claims))
    }

    /// 以相同身份重新签发，过期时间严格晚于旧 token
    pub fn reissue(&self, previous: &AuthClaims) -> Result<(String, AuthClaims)> {
        let now = Utc::now();
        let fresh_exp = self.expiry_after(now)?;
        let claims = AuthClaims {
            sub: previous.sub.clone(),
            email: previous.email.clone(),
            iat: now.timestamp(),
            exp: fresh_exp.max(previous.exp.saturating_add(1)),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: AUTH_TOKEN_TYPE.to_string(),
        };

        let token = self.encode_claims(&claims)?;
        Ok((token, claims))
    }

    /// 校验签名、过期时间与 token 类型
    pub fn validate(&self, token: &str) -> Result<AuthClaims> {
        let token_data = decode::<AuthClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != AUTH_TOKEN_TYPE {
            return Err(LinkshelfError::invalid_token("Unexpected token type"));
        }

        Ok(token_data.claims)
    }
}
