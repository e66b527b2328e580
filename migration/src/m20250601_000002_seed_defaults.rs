use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 管理员角色拥有的全部权限
const ADMIN_PERMISSIONS: &str = r#"["exams.read","exams.write","results.read","students.read","students.write","announcements.read","announcements.write","previous_questions.read","previous_questions.write","settings.read","settings.write","roles.manage","subjects.write","help.manage"]"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        // ==================== 系统角色 ====================
        let default_roles = [
            ("super_admin", "Full access to every module", r#"["*"]"#),
            ("admin", "Administrative staff", ADMIN_PERMISSIONS),
            ("student", "Registered candidate", "[]"),
        ];

        for (name, description, permissions) in default_roles {
            let insert = Query::insert()
                .into_table(Roles::Table)
                .columns([
                    Roles::Name,
                    Roles::Description,
                    Roles::Permissions,
                    Roles::IsSystem,
                    Roles::CreatedAt,
                    Roles::UpdatedAt,
                ])
                .values_panic([
                    name.into(),
                    description.into(),
                    permissions.into(),
                    true.into(),
                    now.into(),
                    now.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        // ==================== 默认设置 ====================
        let default_settings = [
            ("site.name", r#""Exam Administration""#),
            ("exam.default_duration", "180"),
            ("results.pass_percentage", "40"),
            ("registration.open", "true"),
        ];

        for (key, value) in default_settings {
            let insert = Query::insert()
                .into_table(Settings::Table)
                .columns([Settings::Key, Settings::Value, Settings::UpdatedAt])
                .values_panic([key.into(), value.into(), now.into()])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(Expr::col(Roles::IsSystem).eq(true))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Settings::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Roles {
    #[sea_orm(iden = "roles")]
    Table,
    Name,
    Description,
    Permissions,
    IsSystem,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Settings {
    #[sea_orm(iden = "settings")]
    Table,
    Key,
    Value,
    UpdatedAt,
}
