use super::entities::{Exam, ExamSubject};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 考试详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub exam: Exam,
    pub subjects: Vec<ExamSubject>,
    pub question_count: i64,
}

// 创建考试响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamCreatedResponse {
    pub exam_id: i64,
    pub exam: ExamDetail,
}

// 考试列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
    pub pagination: PaginationInfo,
}

// 同组试卷列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSetsResponse {
    pub items: Vec<Exam>,
}
