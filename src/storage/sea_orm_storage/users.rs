use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ExamAdminError, Result};
use crate::models::users::{
    entities::User,
    requests::{NewUser, UserChanges},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            student_id: Set(req.student_id),
            password_hash: Set(req.password_hash),
            role: Set(req.role),
            status: Set(req.status.to_string()),
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            state: Set(req.state),
            district: Set(req.district),
            region: Set(req.region),
            college: Set(req.college),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create user", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query user", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名、邮箱或学号获取用户
    pub async fn get_user_by_login_impl(&self, identifier: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier))
                    .add(Column::StudentId.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query user", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 某角色下的用户数
    pub async fn count_users_with_role_impl(&self, role: &str) -> Result<u64> {
        Users::find()
            .filter(Column::Role.eq(role))
            .count(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count users", e))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update last login", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 查找占用了给定用户名/邮箱/学号的其他用户
    pub async fn find_user_conflict_impl(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        student_id: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<&'static str>> {
        let checks = [
            ("username", Column::Username, username),
            ("email", Column::Email, email),
            ("student_id", Column::StudentId, student_id),
        ];

        for (field, column, value) in checks {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            let mut select = Users::find().filter(column.eq(value));
            if let Some(id) = exclude_id {
                select = select.filter(Column::Id.ne(id));
            }
            let existing = select
                .one(&self.db)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to check user uniqueness", e))?;
            if existing.is_some() {
                return Ok(Some(field));
            }
        }

        Ok(None)
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(username) = changes.username {
            model.username = Set(username);
        }
        // 空字符串表示清除
        if let Some(email) = changes.email {
            model.email = Set(Some(email).filter(|s| !s.is_empty()));
        }
        if let Some(student_id) = changes.student_id {
            model.student_id = Set(Some(student_id).filter(|s| !s.is_empty()));
        }
        if let Some(password_hash) = changes.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(status) = changes.status {
            model.status = Set(status.to_string());
        }
        if let Some(full_name) = changes.full_name {
            model.full_name = Set(Some(full_name));
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(state) = changes.state {
            model.state = Set(Some(state));
        }
        if let Some(district) = changes.district {
            model.district = Set(Some(district));
        }
        if let Some(region) = changes.region {
            model.region = Set(Some(region));
        }
        if let Some(college) = changes.college {
            model.college = Set(Some(college));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update user", e))?;

        Ok(Some(result.into_user()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::new_student;

    #[tokio::test]
    async fn test_login_lookup_by_any_identifier() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();

        for identifier in ["asha01", "asha01@example.com", "STU-001"] {
            let found = storage.get_user_by_login_impl(identifier).await.unwrap();
            assert_eq!(found.map(|u| u.id), Some(user.id));
        }
        assert!(storage.get_user_by_login_impl("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();

        let err = storage
            .create_user_impl(new_student("asha01", "STU-002"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_user_conflict_excludes_self() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        storage
            .create_user_impl(new_student("ravi02", "STU-002"))
            .await
            .unwrap();

        let own = storage
            .find_user_conflict_impl(Some("asha01"), None, Some("STU-001"), Some(a.id))
            .await
            .unwrap();
        assert_eq!(own, None);

        let clash = storage
            .find_user_conflict_impl(Some("asha01"), None, Some("STU-002"), Some(a.id))
            .await
            .unwrap();
        assert_eq!(clash, Some("student_id"));
    }
}
