use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题型，mcq/descriptive/numerical 之外的值原样保留
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionType {
    Mcq,
    Descriptive,
    Numerical,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Descriptive => "descriptive",
            QuestionType::Numerical => "numerical",
            QuestionType::Other(s) => s,
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self, QuestionType::Mcq)
    }
}

impl From<&str> for QuestionType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcq" => QuestionType::Mcq,
            "descriptive" => QuestionType::Descriptive,
            "numerical" => QuestionType::Numerical,
            other => QuestionType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QuestionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(serde::de::Error::custom("question type cannot be empty"));
        }
        Ok(QuestionType::from(s.as_str()))
    }
}

// 难度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub option_text: String,
    pub is_correct: bool,
    pub option_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub exam_id: i64,
    pub question_text: String,
    #[ts(type = "string")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub marks: i32,
    pub explanation: Option<String>,
    pub subject: Option<String>,
    /// 按 option_order 升序
    pub options: Vec<QuestionOption>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
