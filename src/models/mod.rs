//! 数据模型
//!
//! 每个资源一个子模块，按 entities / requests / responses 拆分。

pub mod announcements;
pub mod auth;
pub mod common;
pub mod exams;
pub mod help;
pub mod previous_questions;
pub mod questions;
pub mod results;
pub mod roles;
pub mod settings;
pub mod students;
pub mod subjects;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;
use ts_rs::TS;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 按资源分段：通用 1xxx、认证 2xxx、用户 3xxx、考试 4xxx、公告 5xxx、
/// 文件 6xxx、历年真题 7xxx、设置与角色 8xxx、帮助 9xxx。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/error_code.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,

    // 用户 / 学生
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserPasswordInvalid = 3002,
    UserNameInvalid = 3003,
    UserEmailInvalid = 3004,

    // 考试与题目
    ExamNotFound = 4000,
    ExamAlreadyExists = 4001,
    ExamValidationFailed = 4002,
    QuestionNotFound = 4003,
    QuestionValidationFailed = 4004,
    ExportFailed = 4500,

    // 公告
    AnnouncementNotFound = 5000,
    MediaUrlInvalid = 5001,

    // 文件
    FileNotFound = 6000,
    FileTypeNotAllowed = 6001,
    FileSizeExceeded = 6002,
    FileUploadFailed = 6003,
    MultifileUploadNotAllowed = 6004,
    RemoteFetchFailed = 6005,

    // 历年真题
    PreviousQuestionNotFound = 7000,
    PreviousQuestionPermissionDenied = 7001,

    // 设置 / 角色
    SettingNotFound = 8000,
    RoleNotFound = 8001,
    RoleAlreadyExists = 8002,
    SystemRoleImmutable = 8003,
    RoleInUse = 8004,
    PermissionUnknown = 8005,

    // 科目
    SubjectNotFound = 8500,
    SubjectAlreadyExists = 8501,

    // 帮助
    FaqNotFound = 9000,
    TicketNotFound = 9001,
}
