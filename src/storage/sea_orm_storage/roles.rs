use super::SeaOrmStorage;
use crate::entity::roles::{ActiveModel, Column, Entity as Roles};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ExamAdminError, Result};
use crate::models::roles::entities::Role;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_roles_impl(&self) -> Result<Vec<Role>> {
        let roles = Roles::find()
            .order_by_desc(Column::IsSystem)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list roles", e))?;

        Ok(roles.into_iter().map(|m| m.into_role()).collect())
    }

    pub async fn get_role_by_id_impl(&self, id: i64) -> Result<Option<Role>> {
        let role = Roles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query role", e))?;

        Ok(role.map(|m| m.into_role()))
    }

    pub async fn get_role_by_name_impl(&self, name: &str) -> Result<Option<Role>> {
        let role = Roles::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query role", e))?;

        Ok(role.map(|m| m.into_role()))
    }

    pub async fn create_role_impl(
        &self,
        name: &str,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> Result<Role> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            permissions: Set(serde_json::to_string(&permissions)?),
            is_system: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create role", e))?;

        Ok(result.into_role())
    }

    /// 更新角色，WHERE 条件带 is_system = false
    pub async fn update_role_impl(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> Result<Option<Role>> {
        // 改名会让已分配该角色的用户失去权限
        if let Some(ref new_name) = name
            && let Some(existing) = self.get_role_by_id_impl(id).await?
            && !existing.is_system
            && existing.name != *new_name
        {
            let in_use = Users::find()
                .filter(UserColumn::Role.eq(existing.name.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to count role users", e))?;
            if in_use > 0 {
                return Err(ExamAdminError::conflict(format!(
                    "Role '{}' is assigned to users and cannot be renamed",
                    existing.name
                )));
            }
        }

        let now = chrono::Utc::now().timestamp();

        let mut update = Roles::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsSystem.eq(false));
        if let Some(name) = name {
            update = update.col_expr(Column::Name, Expr::value(name));
        }
        if let Some(description) = description {
            update = update.col_expr(Column::Description, Expr::value(description));
        }
        if let Some(permissions) = permissions {
            update = update.col_expr(
                Column::Permissions,
                Expr::value(serde_json::to_string(&permissions)?),
            );
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update role", e))?;

        if result.rows_affected == 0 {
            return self.explain_untouched_role(id).await.map(|_| None);
        }

        self.get_role_by_id_impl(id).await
    }

    /// 删除角色，仍有用户使用时拒绝
    pub async fn delete_role_impl(&self, id: i64) -> Result<bool> {
        let Some(role) = self.get_role_by_id_impl(id).await? else {
            return Ok(false);
        };
        if role.is_system {
            return Err(ExamAdminError::authorization(format!(
                "System role '{}' cannot be deleted",
                role.name
            )));
        }

        let in_use = Users::find()
            .filter(UserColumn::Role.eq(role.name.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count role users", e))?;
        if in_use > 0 {
            return Err(ExamAdminError::conflict(format!(
                "Role '{}' is still assigned to {in_use} user(s)",
                role.name
            )));
        }

        let result = Roles::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::IsSystem.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete role", e))?;

        if result.rows_affected == 0 {
            return self.explain_untouched_role(id).await.map(|_| false);
        }
        Ok(true)
    }

    // 受保护的写操作没有命中行：系统角色返回授权错误，否则视为不存在
    async fn explain_untouched_role(&self, id: i64) -> Result<()> {
        match self.get_role_by_id_impl(id).await? {
            Some(role) if role.is_system => Err(ExamAdminError::authorization(format!(
                "System role '{}' cannot be modified",
                role.name
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::role_names;

    #[tokio::test]
    async fn test_system_roles_are_seeded() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let super_admin = storage
            .get_role_by_name_impl(role_names::SUPER_ADMIN)
            .await
            .unwrap()
            .unwrap();
        assert!(super_admin.is_system);
        assert_eq!(super_admin.permissions, vec!["*".to_string()]);
    }

    #[tokio::test]
    async fn test_system_role_is_immutable() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let admin = storage
            .get_role_by_name_impl(role_names::ADMIN)
            .await
            .unwrap()
            .unwrap();

        let err = storage
            .update_role_impl(admin.id, None, Some("changed".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Authorization(_)));

        let err = storage.delete_role_impl(admin.id).await.unwrap_err();
        assert!(matches!(err, ExamAdminError::Authorization(_)));

        let unchanged = storage.get_role_by_id_impl(admin.id).await.unwrap().unwrap();
        assert_eq!(unchanged.description, admin.description);
    }

    #[tokio::test]
    async fn test_custom_role_lifecycle() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let role = storage
            .create_role_impl("reviewer", None, vec!["results.read".into()])
            .await
            .unwrap();

        let updated = storage
            .update_role_impl(
                role.id,
                None,
                Some("Reads results".into()),
                Some(vec!["results.read".into(), "exams.read".into()]),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.permissions.len(), 2);
        assert_eq!(updated.description.as_deref(), Some("Reads results"));

        assert!(storage.delete_role_impl(role.id).await.unwrap());
        assert!(!storage.delete_role_impl(role.id).await.unwrap());
        assert!(
            storage
                .update_role_impl(role.id, None, None, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_role_in_use_cannot_be_deleted() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let role = storage
            .create_role_impl("proctor", None, vec![])
            .await
            .unwrap();
        crate::test_support::create_user_with_role(&storage, "proctor1", "proctor").await;

        let err = storage.delete_role_impl(role.id).await.unwrap_err();
        assert!(matches!(err, ExamAdminError::Conflict(_)));
    }
}
