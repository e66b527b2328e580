use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Difficulty, QuestionType};
use crate::errors::{ExamAdminError, Result};

// 题目请求，创建与更新共用
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionRequest {
    pub question_text: String,
    #[ts(type = "string")]
    pub question_type: QuestionType,
    pub difficulty: Option<Difficulty>,
    pub marks: i32,
    pub explanation: Option<String>,
    pub subject: Option<String>,
    /// 选择题选项文本，按顺序排列
    #[serde(default)]
    pub options: Vec<String>,
    /// 正确选项下标（从 0 开始）
    pub correct_option: Option<usize>,
}

/// 校验后的选择题选项，恰好一个正确答案
#[derive(Debug, Clone, PartialEq)]
pub struct McqOptions {
    texts: Vec<String>,
    correct: usize,
}

impl McqOptions {
    pub fn new(texts: Vec<String>, correct: Option<usize>) -> Result<Self> {
        let texts: Vec<String> = texts.into_iter().map(|t| t.trim().to_string()).collect();
        if texts.len() < 2 {
            return Err(ExamAdminError::validation(
                "Multiple choice questions need at least two options",
            ));
        }
        if texts.iter().any(|t| t.is_empty()) {
            return Err(ExamAdminError::validation("Option text cannot be empty"));
        }
        let correct = correct.ok_or_else(|| {
            ExamAdminError::validation("correct_option is required for multiple choice questions")
        })?;
        if correct >= texts.len() {
            return Err(ExamAdminError::validation(format!(
                "correct_option {correct} is out of range (0..{})",
                texts.len()
            )));
        }
        Ok(Self { texts, correct })
    }

    /// (文本, 是否正确, 顺序)
    pub fn rows(&self) -> impl Iterator<Item = (&str, bool, i32)> {
        self.texts
            .iter()
            .enumerate()
            .map(|(i, text)| (text.as_str(), i == self.correct, i as i32))
    }
}

/// 存储层使用的题目数据
#[derive(Debug, Clone)]
pub struct QuestionDraft {
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub marks: i32,
    pub explanation: Option<String>,
    pub subject: Option<String>,
    /// 非选择题为 None
    pub options: Option<McqOptions>,
}

impl TryFrom<QuestionRequest> for QuestionDraft {
    type Error = ExamAdminError;

    fn try_from(req: QuestionRequest) -> Result<Self> {
        let question_text = req.question_text.trim().to_string();
        if question_text.is_empty() {
            return Err(ExamAdminError::validation("Question text is required"));
        }
        if req.marks < 0 {
            return Err(ExamAdminError::validation("Marks cannot be negative"));
        }
        let options = if req.question_type.is_mcq() {
            Some(McqOptions::new(req.options, req.correct_option)?)
        } else {
            None
        };

        Ok(Self {
            question_text,
            question_type: req.question_type,
            difficulty: req.difficulty.unwrap_or(Difficulty::Medium),
            marks: req.marks,
            explanation: req.explanation.filter(|s| !s.trim().is_empty()),
            subject: req.subject.filter(|s| !s.trim().is_empty()),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question_type: &str, options: &[&str], correct: Option<usize>) -> QuestionRequest {
        QuestionRequest {
            question_text: "What is 2 + 2?".into(),
            question_type: QuestionType::from(question_type),
            difficulty: None,
            marks: 4,
            explanation: None,
            subject: Some("Mathematics".into()),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_option: correct,
        }
    }

    #[test]
    fn test_mcq_exactly_one_correct() {
        let draft = QuestionDraft::try_from(request("mcq", &["3", "4", "5"], Some(1))).unwrap();
        let rows: Vec<_> = draft.options.as_ref().unwrap().rows().collect();
        assert_eq!(rows, vec![("3", false, 0), ("4", true, 1), ("5", false, 2)]);
        assert_eq!(draft.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_mcq_rejects_bad_options() {
        assert!(QuestionDraft::try_from(request("mcq", &["4"], Some(0))).is_err());
        assert!(QuestionDraft::try_from(request("mcq", &["3", "4"], Some(2))).is_err());
        assert!(QuestionDraft::try_from(request("mcq", &["3", "4"], None)).is_err());
        assert!(QuestionDraft::try_from(request("mcq", &["3", " "], Some(0))).is_err());
    }

    #[test]
    fn test_non_mcq_ignores_options() {
        let draft = QuestionDraft::try_from(request("numerical", &["x"], None)).unwrap();
        assert!(draft.options.is_none());
        assert_eq!(draft.question_type, QuestionType::Numerical);
    }

    #[test]
    fn test_free_text_question_type() {
        let qt: QuestionType = serde_json::from_str("\"Matrix-Match\"").unwrap();
        assert_eq!(qt, QuestionType::Other("matrix-match".into()));
        assert_eq!(serde_json::to_string(&QuestionType::Mcq).unwrap(), "\"mcq\"");
        assert!(serde_json::from_str::<QuestionType>("\"\"").is_err());
    }
}
