use super::entities::{StudentExamAttempt, StudentStats};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 学生信息及统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    #[serde(flatten)]
    #[ts(flatten)]
    pub stats: StudentStats,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentResponse>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentExamsResponse {
    pub items: Vec<StudentExamAttempt>,
}
