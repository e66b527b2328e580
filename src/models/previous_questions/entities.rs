use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目模式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub enum SubjectMode {
    Single,
    Multiple,
}

impl std::fmt::Display for SubjectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectMode::Single => write!(f, "single"),
            SubjectMode::Multiple => write!(f, "multiple"),
        }
    }
}

impl std::str::FromStr for SubjectMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(SubjectMode::Single),
            "multiple" => Ok(SubjectMode::Multiple),
            _ => Err(format!("Invalid subject mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub struct PreviousQuestionSet {
    pub id: i64,
    pub course: String,
    pub subject_mode: SubjectMode,
    pub subjects: Vec<String>,
    pub exam_conducted_on: Option<String>,
    pub resource_url: String,
    pub notes: Option<String>,
    pub uploaded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 资源类型，决定预览方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub enum ResourceKind {
    Image,
    Pdf,
    Office,
    Other,
}

impl ResourceKind {
    /// 按 URL 路径的扩展名分类，忽略查询串
    pub fn classify(url: &str) -> Self {
        let path = url::Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.split(['?', '#']).next().unwrap_or_default().to_string());
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => ResourceKind::Image,
            "pdf" => ResourceKind::Pdf,
            "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" => ResourceKind::Office,
            _ => ResourceKind::Other,
        }
    }
}
