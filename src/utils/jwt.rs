use crate::config::AppConfig;
use crate::errors::{ExamAdminError, Result};
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_COOKIE: &str = "refresh_token";

/// token 种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,     // 用户 ID
    pub role: String,    // 签发时的角色名，权限以数据库为准
    pub kind: TokenKind, // access / refresh
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| ExamAdminError::authentication("Invalid token subject"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static [u8] {
        AppConfig::get().jwt.secret.as_bytes()
    }

    pub fn generate_access_token(user_id: i64, role: &str) -> Result<String> {
        let config = AppConfig::get();
        Self::generate_token(
            user_id,
            role,
            TokenKind::Access,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    /// 生成 Refresh Token，未指定有效期时使用配置中的天数
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        expiry: Option<chrono::Duration>,
    ) -> Result<String> {
        let expiry = expiry
            .unwrap_or_else(|| chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry));
        Self::generate_token(user_id, role, TokenKind::Refresh, expiry)
    }

    pub fn generate_token(
        user_id: i64,
        role: &str,
        kind: TokenKind,
        expiry: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            kind,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Self::secret()),
        )?;
        Ok(token)
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_expiry)?,
        })
    }

    /// 校验签名、有效期与 token 种类
    pub fn verify(token: &str, expected: TokenKind) -> Result<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret()),
            &Validation::default(),
        )?
        .claims;

        if claims.kind != expected {
            return Err(ExamAdminError::authentication("Unexpected token type"));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims> {
        Self::verify(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims> {
        Self::verify(token, TokenKind::Refresh)
    }

    /// 使用 Refresh Token 换取新的 Access Token
    pub fn refresh_access_token(refresh_token: &str) -> Result<(Claims, String)> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let access = Self::generate_access_token(claims.user_id()?, &claims.role)?;
        Ok((claims, access))
    }

    pub fn create_refresh_token_cookie(refresh_token: &str, max_age_days: i64) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/api/auth")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 注销时下发的过期 Cookie
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, "")
            .path("/api/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|v| !v.is_empty())
    }
}
