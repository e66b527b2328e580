use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttemptStatus;
use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserStatus;

// 学生列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 创建学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
}

// 更新学生请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub password: Option<String>,
    pub status: Option<UserStatus>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
}

// 报名考试
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RegisterExamRequest {
    pub exam_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct SubjectScoreInput {
    pub exam_subject_id: i64,
    pub score: f64,
}

// 记录考试结果
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct RecordAttemptRequest {
    pub status: AttemptStatus,
    pub score: Option<f64>,
    #[serde(default)]
    pub subject_scores: Vec<SubjectScoreInput>,
}

/// 存储层使用的列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            state: params.state,
            district: params.district,
            region: params.region,
            college: params.college,
            status: params.status,
            search: params.search,
        }
    }
}
