use serde::Deserialize;

use super::entities::UserStatus;

/// 创建用户时写入存储层的数据，password_hash 已经过哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub status: UserStatus,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
}

/// 用户资料的部分更新，None 表示不修改
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub status: Option<UserStatus>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
}
