//! 系统设置实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON 文本
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub updated_by: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_setting(self) -> crate::models::settings::entities::Setting {
        use crate::models::settings::entities::Setting;

        // 非 JSON 的历史值按字符串返回
        let value = serde_json::from_str(&self.value)
            .unwrap_or_else(|_| serde_json::Value::String(self.value.clone()));

        Setting {
            key: self.key,
            value,
            updated_by: self.updated_by,
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
