use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 实时考试的分类名，同组试卷按 set_type 区分
pub const REALTIME_CATEGORY: &str = "realtime";

// 考试形式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamFormat {
    Single,        // 单科
    Comprehensive, // 综合
}

impl std::fmt::Display for ExamFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamFormat::Single => write!(f, "single"),
            ExamFormat::Comprehensive => write!(f, "comprehensive"),
        }
    }
}

impl std::str::FromStr for ExamFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ExamFormat::Single),
            "comprehensive" => Ok(ExamFormat::Comprehensive),
            _ => Err(format!("Invalid exam format: {s}")),
        }
    }
}

// 考试状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamStatus {
    Draft,
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamStatus::Draft => "draft",
            ExamStatus::Scheduled => "scheduled",
            ExamStatus::Active => "active",
            ExamStatus::Completed => "completed",
            ExamStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ExamStatus::Draft),
            "scheduled" => Ok(ExamStatus::Scheduled),
            "active" => Ok(ExamStatus::Active),
            "completed" => Ok(ExamStatus::Completed),
            "cancelled" => Ok(ExamStatus::Cancelled),
            _ => Err(format!("Invalid exam status: {s}")),
        }
    }
}

// 考试实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub exam_type: String,
    pub exam_format: ExamFormat,
    pub total_marks: i32,
    /// 时长（分钟）
    pub duration: i32,
    /// YYYY-MM-DD
    pub start_date: String,
    /// HH:MM
    pub start_time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub status: ExamStatus,
    pub category: String,
    pub set_type: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Exam {
    pub fn is_realtime(&self) -> bool {
        self.category == REALTIME_CATEGORY
    }
}

// 考试科目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSubject {
    pub id: i64,
    pub exam_id: i64,
    pub subject: String,
    pub marks: i32,
}

/// 实时考试组的唯一键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSetKey {
    pub title: String,
    pub start_date: String,
    pub category: String,
    pub set_type: String,
}
