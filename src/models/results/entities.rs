use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩行：一次已完成的考试，附带四个维度的排名
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultRow {
    pub student_exam_id: i64,
    pub user_id: i64,
    pub username: String,
    pub student_name: Option<String>,
    pub student_id: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub exam_id: i64,
    pub exam_title: String,
    pub exam_type: String,
    pub exam_format: String,
    pub total_marks: i32,
    /// 科目标签，如 "Physics, Chemistry" 或 "PCM"
    pub subject: String,
    pub score: f64,
    pub percentage: Option<f64>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub exam_rank: i64,
    pub state_rank: i64,
    pub district_rank: i64,
    pub overall_rank: i64,
}

// 每场考试的汇总
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamResultSummary {
    pub exam_id: i64,
    pub exam_title: String,
    pub exam_type: String,
    pub attempts: i64,
    pub average_score: Option<f64>,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub average_percentage: Option<f64>,
}
