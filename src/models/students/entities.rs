use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试报名状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum AttemptStatus {
    Registered,
    InProgress,
    Completed,
    Absent,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttemptStatus::Registered => "registered",
            AttemptStatus::InProgress => "in_progress",
            AttemptStatus::Completed => "completed",
            AttemptStatus::Absent => "absent",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(AttemptStatus::Registered),
            "in_progress" => Ok(AttemptStatus::InProgress),
            "completed" => Ok(AttemptStatus::Completed),
            "absent" => Ok(AttemptStatus::Absent),
            _ => Err(format!("Invalid attempt status: {s}")),
        }
    }
}

// 学生统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentStats {
    /// 已完成的考试数
    pub exams_taken: i64,
    pub average_percentage: Option<f64>,
    /// 完成次数最多的考试类型
    pub preferred_exam_type: Option<String>,
}

// 分科得分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct SubjectScore {
    pub exam_subject_id: i64,
    pub subject: String,
    pub marks: i32,
    pub score: f64,
}

// 考试记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentExamAttempt {
    pub id: i64,
    pub user_id: i64,
    pub exam_id: i64,
    pub exam_title: String,
    pub exam_type: String,
    pub status: AttemptStatus,
    pub score: Option<f64>,
    pub percentage: Option<f64>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub subject_scores: Vec<SubjectScore>,
}
