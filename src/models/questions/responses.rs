use super::entities::Question;
use serde::Serialize;
use ts_rs::TS;

// 题目列表响应，附带分值合计供前端提示
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
    pub total_question_marks: i64,
    pub exam_total_marks: i32,
}
