use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 内置角色名，与 roles 表中 is_system 的记录对应
pub mod role_names {
    pub const SUPER_ADMIN: &str = "super_admin";
    pub const ADMIN: &str = "admin";
    pub const STUDENT: &str = "student";
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid user status: '{s}', expected one of: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体（管理员与学生共用一张表）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: String,
    pub status: UserStatus,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn is_student(&self) -> bool {
        self.role == role_names::STUDENT
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.role, refresh_token_expiry)
            .map_err(|e| {
                crate::errors::ExamAdminError::authentication(format!(
                    "Failed to generate token pair: {e}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_parse_and_display() {
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended] {
            assert_eq!(status.to_string().parse::<UserStatus>().unwrap(), status);
        }
        assert!("deleted".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_user_status_deserialize_rejects_unknown() {
        let ok: UserStatus = serde_json::from_str("\"suspended\"").unwrap();
        assert_eq!(ok, UserStatus::Suspended);
        assert!(serde_json::from_str::<UserStatus>("\"banned\"").is_err());
    }
}
