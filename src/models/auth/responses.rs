use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

/// 访问令牌，登录与刷新共用
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// 秒
    pub expires_in: i64,
}

impl AccessToken {
    pub fn bearer(access_token: String, expiry_minutes: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: expiry_minutes * 60,
        }
    }
}

/// 当前登录者，前端据 permissions 决定可见菜单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct SessionUser {
    pub user: User,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub token: AccessToken,
    #[serde(flatten)]
    pub session: SessionUser,
    pub logged_in_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_expiry_in_seconds() {
        let token = AccessToken::bearer("abc".into(), 15);
        assert_eq!(token.expires_in, 900);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["token_type"], "Bearer");
    }
}
