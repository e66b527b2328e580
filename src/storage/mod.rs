use std::collections::BTreeMap;
use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名、邮箱或学号获取用户信息
    async fn get_user_by_login(&self, identifier: &str) -> Result<Option<User>>;
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 某角色下的用户数，启动时判断是否需要创建超级管理员
    async fn count_users_with_role(&self, role: &str) -> Result<u64>;
    // 查找与给定用户名/邮箱/学号冲突的其他用户，返回冲突字段名
    async fn find_user_conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        student_id: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<&'static str>>;

    /// 角色管理方法
    async fn list_roles(&self) -> Result<Vec<Role>>;
    async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>>;
    async fn get_role_by_name(&self, name: &str) -> Result<Option<Role>>;
    async fn create_role(
        &self,
        name: &str,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> Result<Role>;
    // 只能修改非系统角色，系统角色返回授权错误
    async fn update_role(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> Result<Option<Role>>;
    // 只能删除非系统角色且没有用户在使用
    async fn delete_role(&self, id: i64) -> Result<bool>;

    /// 考试管理方法
    async fn list_exams(&self, query: ExamListQuery) -> Result<ExamListResponse>;
    async fn get_exam(&self, id: i64) -> Result<Option<Exam>>;
    async fn get_exam_detail(&self, id: i64) -> Result<Option<ExamDetail>>;
    // 查找同组同 set_type 的其他考试
    async fn find_exam_set_conflict(
        &self,
        key: &ExamSetKey,
        exclude_id: Option<i64>,
    ) -> Result<Option<i64>>;
    // 在一个事务中插入考试及科目
    async fn create_exam(
        &self,
        draft: ExamDraft,
        subjects: Vec<ExamSubjectInput>,
        created_by: Option<i64>,
    ) -> Result<ExamDetail>;
    // 在一个事务中更新考试，subjects 为 Some 时按差异同步科目
    async fn update_exam(
        &self,
        id: i64,
        draft: ExamDraft,
        subjects: Option<Vec<ExamSubjectInput>>,
    ) -> Result<Option<ExamDetail>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;
    // 同组试卷（title、start_date、category 相同）
    async fn list_exam_sets(&self, exam: &Exam) -> Result<Vec<Exam>>;

    /// 题目管理方法
    async fn list_questions(&self, exam_id: i64) -> Result<Vec<Question>>;
    async fn create_question(&self, exam_id: i64, draft: QuestionDraft) -> Result<Question>;
    async fn update_question(
        &self,
        exam_id: i64,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>>;
    async fn delete_question(&self, exam_id: i64, question_id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse>;
    async fn get_student(&self, id: i64) -> Result<Option<StudentResponse>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn list_student_attempts(&self, user_id: i64) -> Result<Vec<StudentExamAttempt>>;
    // 报名，已存在时保持原记录
    async fn register_student_exam(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<StudentExamAttempt>;
    async fn record_student_exam(
        &self,
        user_id: i64,
        exam_id: i64,
        record: RecordAttemptRequest,
    ) -> Result<Option<StudentExamAttempt>>;

    /// 成绩统计方法
    async fn list_results(&self, window: ResultsWindow) -> Result<Vec<ResultRow>>;
    async fn summarize_results(&self, window: ResultsWindow) -> Result<Vec<ExamResultSummary>>;

    /// 公告管理方法
    async fn list_announcements(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse>;
    async fn get_announcement(&self, id: i64) -> Result<Option<Announcement>>;
    async fn create_announcement(
        &self,
        draft: AnnouncementDraft,
        created_by: Option<i64>,
    ) -> Result<Announcement>;
    async fn update_announcement(
        &self,
        id: i64,
        draft: AnnouncementDraft,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;
    // 已发布、未过期且对该角色可见的公告
    async fn list_active_announcements(&self, role: &str) -> Result<Vec<Announcement>>;
    // 浏览数加一，返回新的浏览数
    async fn increment_announcement_views(&self, id: i64) -> Result<Option<i64>>;

    /// 历年真题方法
    async fn list_previous_questions(
        &self,
        query: PreviousQuestionListQuery,
    ) -> Result<PreviousQuestionListResponse>;
    async fn get_previous_question(&self, id: i64) -> Result<Option<PreviousQuestionSet>>;
    async fn create_previous_question(
        &self,
        draft: PreviousQuestionDraft,
    ) -> Result<PreviousQuestionSet>;
    // 只有上传者可以删除
    async fn delete_previous_question(&self, id: i64, requester_id: i64) -> Result<bool>;

    /// 系统设置方法
    async fn list_settings(&self) -> Result<Vec<Setting>>;
    async fn get_setting(&self, key: &str) -> Result<Option<Setting>>;
    async fn upsert_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<Setting>;
    // 批量写入，一个事务
    async fn upsert_settings(
        &self,
        values: BTreeMap<String, serde_json::Value>,
        updated_by: Option<i64>,
    ) -> Result<Vec<Setting>>;

    /// 科目目录方法
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject(&self, id: i64) -> Result<Option<Subject>>;
    async fn create_subject(
        &self,
        name: &str,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Subject>;
    async fn update_subject(
        &self,
        id: i64,
        name: Option<String>,
        code: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 帮助中心方法
    async fn list_faqs(&self) -> Result<Vec<Faq>>;
    async fn create_faq(&self, faq: FaqRequest) -> Result<Faq>;
    async fn update_faq(&self, id: i64, faq: FaqRequest) -> Result<Option<Faq>>;
    async fn delete_faq(&self, id: i64) -> Result<bool>;
    async fn create_ticket(
        &self,
        user_id: i64,
        subject: &str,
        message: &str,
    ) -> Result<SupportTicket>;
    async fn list_tickets(&self, query: TicketListQuery) -> Result<TicketListResponse>;
    async fn update_ticket(
        &self,
        id: i64,
        status: Option<TicketStatus>,
        admin_response: Option<String>,
    ) -> Result<Option<SupportTicket>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
