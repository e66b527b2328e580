use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubjectMode;
use crate::errors::{ExamAdminError, Result};
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub struct PreviousQuestionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course: Option<String>,
    pub subject_mode: Option<SubjectMode>,
}

/// 存储层使用的列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct PreviousQuestionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<String>,
    pub subject_mode: Option<SubjectMode>,
}

impl From<PreviousQuestionListParams> for PreviousQuestionListQuery {
    fn from(params: PreviousQuestionListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course: params.course,
            subject_mode: params.subject_mode,
        }
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub struct CreatePreviousQuestionRequest {
    pub course: String,
    pub subject_mode: SubjectMode,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub exam_conducted_on: Option<String>,
    pub resource_url: String,
    pub notes: Option<String>,
}

/// 已校验的真题数据
#[derive(Debug, Clone)]
pub struct PreviousQuestionDraft {
    pub course: String,
    pub subject_mode: SubjectMode,
    pub subjects: Vec<String>,
    pub exam_conducted_on: Option<String>,
    pub resource_url: String,
    pub notes: Option<String>,
    pub uploaded_by: i64,
}

impl CreatePreviousQuestionRequest {
    /// single 恰好一个科目，multiple 至少两个，空白项不计
    pub fn into_draft(self, uploaded_by: i64) -> Result<PreviousQuestionDraft> {
        let course = self.course.trim().to_string();
        if course.is_empty() {
            return Err(ExamAdminError::validation("Course is required"));
        }

        let subjects: Vec<String> = self
            .subjects
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        match self.subject_mode {
            SubjectMode::Single if subjects.len() != 1 => {
                return Err(ExamAdminError::validation(
                    "Single subject mode requires exactly one subject",
                ));
            }
            SubjectMode::Multiple if subjects.len() < 2 => {
                return Err(ExamAdminError::validation(
                    "Multiple subject mode requires at least two subjects",
                ));
            }
            _ => {}
        }

        let resource_url = self.resource_url.trim().to_string();
        let is_local = resource_url.starts_with('/');
        let is_remote = url::Url::parse(&resource_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !is_local && !is_remote {
            return Err(ExamAdminError::validation(
                "Resource URL must be an http(s) URL or an uploaded file path",
            ));
        }

        if let Some(ref date) = self.exam_conducted_on
            && !date.is_empty()
            && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(ExamAdminError::validation(
                "Exam date must be in YYYY-MM-DD format",
            ));
        }

        Ok(PreviousQuestionDraft {
            course,
            subject_mode: self.subject_mode,
            subjects,
            exam_conducted_on: self.exam_conducted_on.filter(|s| !s.is_empty()),
            resource_url,
            notes: self.notes,
            uploaded_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: SubjectMode, subjects: &[&str]) -> CreatePreviousQuestionRequest {
        CreatePreviousQuestionRequest {
            course: "JEE Main".into(),
            subject_mode: mode,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            exam_conducted_on: Some("2024-04-06".into()),
            resource_url: "https://example.com/jee-2024.pdf".into(),
            notes: None,
        }
    }

    #[test]
    fn test_single_mode_needs_exactly_one() {
        assert!(request(SubjectMode::Single, &["Physics"]).into_draft(1).is_ok());
        assert!(request(SubjectMode::Single, &[]).into_draft(1).is_err());
        assert!(request(SubjectMode::Single, &["Physics", "Chemistry"]).into_draft(1).is_err());
        // 空白项不计入
        let draft = request(SubjectMode::Single, &["Physics", "  "]).into_draft(1).unwrap();
        assert_eq!(draft.subjects, vec!["Physics".to_string()]);
    }

    #[test]
    fn test_multiple_mode_needs_two() {
        assert!(request(SubjectMode::Multiple, &["Physics"]).into_draft(1).is_err());
        assert!(request(SubjectMode::Multiple, &["Physics", ""]).into_draft(1).is_err());
        assert!(request(SubjectMode::Multiple, &["Physics", "Chemistry"]).into_draft(7).is_ok());
    }

    #[test]
    fn test_resource_url_scheme() {
        let mut req = request(SubjectMode::Single, &["Physics"]);
        req.resource_url = "ftp://example.com/a.pdf".into();
        assert!(req.into_draft(1).is_err());

        let mut req = request(SubjectMode::Single, &["Physics"]);
        req.resource_url = "/uploads/documents/1-a.pdf".into();
        assert_eq!(req.into_draft(3).unwrap().uploaded_by, 3);
    }
}
