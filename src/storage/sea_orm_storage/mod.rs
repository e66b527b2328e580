//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod exams;
mod help;
mod previous_questions;
mod questions;
mod results;
mod roles;
mod settings;
mod students;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{ExamAdminError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM storage ready, database: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接创建实例并执行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ExamAdminError::database_operation(format!("Migration failed: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite，单连接以保证所有查询看到同一个库
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ExamAdminError::database_config(e.to_string()))?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| ExamAdminError::database_connection(e.to_string()))?;

        Self::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ExamAdminError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                ExamAdminError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            ExamAdminError::database_connection(format!("Unable to connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ExamAdminError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    announcements::{
        entities::Announcement,
        requests::{AnnouncementDraft, AnnouncementListQuery},
        responses::AnnouncementListResponse,
    },
    exams::{
        entities::{Exam, ExamSetKey},
        requests::{ExamDraft, ExamListQuery, ExamSubjectInput},
        responses::{ExamDetail, ExamListResponse},
    },
    help::{
        entities::{Faq, SupportTicket, TicketStatus},
        requests::{FaqRequest, TicketListQuery},
        responses::TicketListResponse,
    },
    previous_questions::{
        entities::PreviousQuestionSet,
        requests::{PreviousQuestionDraft, PreviousQuestionListQuery},
        responses::PreviousQuestionListResponse,
    },
    questions::{entities::Question, requests::QuestionDraft},
    results::{
        entities::{ExamResultSummary, ResultRow},
        requests::ResultsWindow,
    },
    roles::entities::Role,
    settings::entities::Setting,
    students::{
        entities::StudentExamAttempt,
        requests::{RecordAttemptRequest, StudentListQuery},
        responses::{StudentListResponse, StudentResponse},
    },
    subjects::entities::Subject,
    users::{
        entities::User,
        requests::{NewUser, UserChanges},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_login(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_login_impl(identifier).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        self.update_user_impl(id, changes).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_with_role(&self, role: &str) -> Result<u64> {
        self.count_users_with_role_impl(role).await
    }

    async fn find_user_conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        student_id: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<&'static str>> {
        self.find_user_conflict_impl(username, email, student_id, exclude_id)
            .await
    }

    // 角色模块
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.list_roles_impl().await
    }

    async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>> {
        self.get_role_by_id_impl(id).await
    }

    async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.get_role_by_name_impl(name).await
    }

    async fn create_role(
        &self,
        name: &str,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> Result<Role> {
        self.create_role_impl(name, description, permissions).await
    }

    async fn update_role(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> Result<Option<Role>> {
        self.update_role_impl(id, name, description, permissions)
            .await
    }

    async fn delete_role(&self, id: i64) -> Result<bool> {
        self.delete_role_impl(id).await
    }

    // 考试模块
    async fn list_exams(&self, query: ExamListQuery) -> Result<ExamListResponse> {
        self.list_exams_impl(query).await
    }

    async fn get_exam(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_impl(id).await
    }

    async fn get_exam_detail(&self, id: i64) -> Result<Option<ExamDetail>> {
        self.get_exam_detail_impl(id).await
    }

    async fn find_exam_set_conflict(
        &self,
        key: &ExamSetKey,
        exclude_id: Option<i64>,
    ) -> Result<Option<i64>> {
        self.find_exam_set_conflict_impl(key, exclude_id).await
    }

    async fn create_exam(
        &self,
        draft: ExamDraft,
        subjects: Vec<ExamSubjectInput>,
        created_by: Option<i64>,
    ) -> Result<ExamDetail> {
        self.create_exam_impl(draft, subjects, created_by).await
    }

    async fn update_exam(
        &self,
        id: i64,
        draft: ExamDraft,
        subjects: Option<Vec<ExamSubjectInput>>,
    ) -> Result<Option<ExamDetail>> {
        self.update_exam_impl(id, draft, subjects).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn list_exam_sets(&self, exam: &Exam) -> Result<Vec<Exam>> {
        self.list_exam_sets_impl(exam).await
    }

    // 题目模块
    async fn list_questions(&self, exam_id: i64) -> Result<Vec<Question>> {
        self.list_questions_impl(exam_id).await
    }

    async fn create_question(&self, exam_id: i64, draft: QuestionDraft) -> Result<Question> {
        self.create_question_impl(exam_id, draft).await
    }

    async fn update_question(
        &self,
        exam_id: i64,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>> {
        self.update_question_impl(exam_id, question_id, draft).await
    }

    async fn delete_question(&self, exam_id: i64, question_id: i64) -> Result<bool> {
        self.delete_question_impl(exam_id, question_id).await
    }

    // 学生模块
    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        self.list_students_impl(query).await
    }

    async fn get_student(&self, id: i64) -> Result<Option<StudentResponse>> {
        self.get_student_impl(id).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_student_attempts(&self, user_id: i64) -> Result<Vec<StudentExamAttempt>> {
        self.list_student_attempts_impl(user_id).await
    }

    async fn register_student_exam(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<StudentExamAttempt> {
        self.register_student_exam_impl(user_id, exam_id).await
    }

    async fn record_student_exam(
        &self,
        user_id: i64,
        exam_id: i64,
        record: RecordAttemptRequest,
    ) -> Result<Option<StudentExamAttempt>> {
        self.record_student_exam_impl(user_id, exam_id, record)
            .await
    }

    // 成绩模块
    async fn list_results(&self, window: ResultsWindow) -> Result<Vec<ResultRow>> {
        self.list_results_impl(window).await
    }

    async fn summarize_results(&self, window: ResultsWindow) -> Result<Vec<ExamResultSummary>> {
        self.summarize_results_impl(window).await
    }

    // 公告模块
    async fn list_announcements(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        self.list_announcements_impl(query).await
    }

    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>> {
        self.get_announcement_impl(id).await
    }

    async fn create_announcement(
        &self,
        draft: AnnouncementDraft,
        created_by: Option<i64>,
    ) -> Result<Announcement> {
        self.create_announcement_impl(draft, created_by).await
    }

    async fn update_announcement(
        &self,
        id: i64,
        draft: AnnouncementDraft,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(id, draft).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    async fn list_active_announcements(&self, role: &str) -> Result<Vec<Announcement>> {
        self.list_active_announcements_impl(role).await
    }

    async fn increment_announcement_views(&self, id: i64) -> Result<Option<i64>> {
        self.increment_announcement_views_impl(id).await
    }

    // 历年真题模块
    async fn list_previous_questions(
        &self,
        query: PreviousQuestionListQuery,
    ) -> Result<PreviousQuestionListResponse> {
        self.list_previous_questions_impl(query).await
    }

    async fn get_previous_question(&self, id: i64) -> Result<Option<PreviousQuestionSet>> {
        self.get_previous_question_impl(id).await
    }

    async fn create_previous_question(
        &self,
        draft: PreviousQuestionDraft,
    ) -> Result<PreviousQuestionSet> {
        self.create_previous_question_impl(draft).await
    }

    async fn delete_previous_question(&self, id: i64, requester_id: i64) -> Result<bool> {
        self.delete_previous_question_impl(id, requester_id).await
    }

    // 系统设置模块
    async fn list_settings(&self) -> Result<Vec<Setting>> {
        self.list_settings_impl().await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Setting>> {
        self.get_setting_impl(key).await
    }

    async fn upsert_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<Setting> {
        self.upsert_setting_impl(key, value, updated_by).await
    }

    async fn upsert_settings(
        &self,
        values: BTreeMap<String, serde_json::Value>,
        updated_by: Option<i64>,
    ) -> Result<Vec<Setting>> {
        self.upsert_settings_impl(values, updated_by).await
    }

    // 科目目录模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(id).await
    }

    async fn create_subject(
        &self,
        name: &str,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Subject> {
        self.create_subject_impl(name, code, description).await
    }

    async fn update_subject(
        &self,
        id: i64,
        name: Option<String>,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, name, code, description).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 帮助中心模块
    async fn list_faqs(&self) -> Result<Vec<Faq>> {
        self.list_faqs_impl().await
    }

    async fn create_faq(&self, faq: FaqRequest) -> Result<Faq> {
        self.create_faq_impl(faq).await
    }

    async fn update_faq(&self, id: i64, faq: FaqRequest) -> Result<Option<Faq>> {
        self.update_faq_impl(id, faq).await
    }

    async fn delete_faq(&self, id: i64) -> Result<bool> {
        self.delete_faq_impl(id).await
    }

    async fn create_ticket(
        &self,
        user_id: i64,
        subject: &str,
        message: &str,
    ) -> Result<SupportTicket> {
        self.create_ticket_impl(user_id, subject, message).await
    }

    async fn list_tickets(&self, query: TicketListQuery) -> Result<TicketListResponse> {
        self.list_tickets_impl(query).await
    }

    async fn update_ticket(
        &self,
        id: i64,
        status: Option<TicketStatus>,
        admin_response: Option<String>,
    ) -> Result<Option<SupportTicket>> {
        self.update_ticket_impl(id, status, admin_response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("exam_admin.db").unwrap(),
            "sqlite://exam_admin.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/exams").unwrap(),
            "postgres://u:p@localhost/exams"
        );
        assert!(SeaOrmStorage::build_database_url("oracle://nope").is_err());
    }
}
