use serde::Deserialize;
use ts_rs::TS;

use crate::config::JwtConfig;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名、邮箱或学号均可
    #[serde(alias = "login")]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginRequest {
    pub fn identifier(&self) -> &str {
        self.username.trim()
    }

    /// refresh token 有效天数
    pub fn refresh_days(&self, jwt: &JwtConfig) -> i64 {
        if self.remember_me {
            jwt.refresh_token_remember_me_expiry
        } else {
            jwt.refresh_token_expiry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "s".into(),
            access_token_expiry: 60,
            refresh_token_expiry: 7,
            refresh_token_remember_me_expiry: 30,
        }
    }

    #[test]
    fn test_login_request_accepts_alias_and_trims() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"login":"  admin ","password":"x"}"#).unwrap();
        assert_eq!(req.identifier(), "admin");
        assert!(!req.remember_me);
        assert_eq!(req.refresh_days(&jwt_config()), 7);
    }

    #[test]
    fn test_remember_me_extends_refresh() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"username":"s1001","password":"x","remember_me":true}"#,
        )
        .unwrap();
        assert_eq!(req.refresh_days(&jwt_config()), 30);
    }
}
