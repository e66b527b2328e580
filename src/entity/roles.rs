//! 角色实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    /// JSON 数组文本
    pub permissions: String,
    pub is_system: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_role(self) -> crate::models::roles::entities::Role {
        use crate::models::roles::entities::Role;

        let permissions = serde_json::from_str::<Vec<String>>(&self.permissions).unwrap_or_else(|e| {
            tracing::warn!("Role {} has malformed permissions: {}", self.name, e);
            Vec::new()
        });

        Role {
            id: self.id,
            name: self.name,
            description: self.description,
            permissions,
            is_system: self.is_system,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
