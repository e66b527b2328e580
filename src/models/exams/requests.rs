use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ExamFormat, ExamStatus, REALTIME_CATEGORY};
use crate::errors::{ExamAdminError, Result};
use crate::models::common::PaginationQuery;

// 考试列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ExamStatus>,
    pub category: Option<String>,
    pub exam_type: Option<String>,
    pub search: Option<String>,
}

/// 存储层使用的列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ExamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<ExamStatus>,
    pub category: Option<String>,
    pub exam_type: Option<String>,
    pub search: Option<String>,
}

impl From<ExamListParams> for ExamListQuery {
    fn from(params: ExamListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            status: params.status,
            category: params.category,
            exam_type: params.exam_type,
            search: params.search,
        }
    }
}

// 科目输入，带 id 时按 id 匹配已有记录，否则按名称匹配
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSubjectInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub subject: String,
    pub marks: i32,
}

// 创建考试请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub title: String,
    pub exam_type: String,
    pub exam_format: ExamFormat,
    pub total_marks: i32,
    pub duration: i32,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub status: Option<ExamStatus>,
    pub category: String,
    pub set_type: Option<String>,
    #[serde(default)]
    pub subjects: Vec<ExamSubjectInput>,
}

// 更新考试请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub exam_type: Option<String>,
    pub exam_format: Option<ExamFormat>,
    pub total_marks: Option<i32>,
    pub duration: Option<i32>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub status: Option<ExamStatus>,
    pub category: Option<String>,
    pub set_type: Option<String>,
    pub subjects: Option<Vec<ExamSubjectInput>>,
}

// 复制考试为同组新试卷
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateSetRequest {
    pub set_type: String,
}

/// 合并后的考试字段，创建与更新都走同一套校验
#[derive(Debug, Clone)]
pub struct ExamDraft {
    pub title: String,
    pub exam_type: String,
    pub exam_format: ExamFormat,
    pub total_marks: i32,
    pub duration: i32,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub status: ExamStatus,
    pub category: String,
    pub set_type: Option<String>,
}

impl ExamDraft {
    pub fn is_realtime(&self) -> bool {
        self.category == REALTIME_CATEGORY
    }

    /// 校验字段本身与科目列表
    pub fn validate(&self, subjects: Option<&[ExamSubjectInput]>) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ExamAdminError::validation("Exam title is required"));
        }
        if self.exam_type.trim().is_empty() {
            return Err(ExamAdminError::validation("Exam type is required"));
        }
        if self.category.trim().is_empty() {
            return Err(ExamAdminError::validation("Exam category is required"));
        }
        if self.total_marks <= 0 {
            return Err(ExamAdminError::validation(
                "Total marks must be greater than 0",
            ));
        }
        if self.duration <= 0 {
            return Err(ExamAdminError::validation("Duration must be greater than 0"));
        }
        if chrono::NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d").is_err() {
            return Err(ExamAdminError::validation(
                "Start date must be in YYYY-MM-DD format",
            ));
        }
        if let Some(ref time) = self.start_time
            && !time.is_empty()
            && chrono::NaiveTime::parse_from_str(time, "%H:%M").is_err()
        {
            return Err(ExamAdminError::validation("Start time must be in HH:MM format"));
        }
        if self.is_realtime()
            && self
                .set_type
                .as_deref()
                .is_none_or(|s| s.trim().is_empty())
        {
            return Err(ExamAdminError::validation(
                "Set type is required for realtime exams",
            ));
        }

        if let Some(subjects) = subjects {
            validate_subjects(subjects, self.total_marks)?;
        }
        Ok(())
    }
}

/// 科目名非空且不重复，分值非负且总和不超过考试总分
pub fn validate_subjects(subjects: &[ExamSubjectInput], total_marks: i32) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    let mut sum: i64 = 0;
    for subject in subjects {
        let name = subject.subject.trim();
        if name.is_empty() {
            return Err(ExamAdminError::validation("Subject name cannot be empty"));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(ExamAdminError::validation(format!(
                "Duplicate subject: {name}"
            )));
        }
        if subject.marks < 0 {
            return Err(ExamAdminError::validation(format!(
                "Marks for subject {name} cannot be negative"
            )));
        }
        sum += subject.marks as i64;
    }
    if sum > total_marks as i64 {
        return Err(ExamAdminError::validation(format!(
            "Subject marks ({sum}) exceed exam total marks ({total_marks})"
        )));
    }
    Ok(())
}

impl From<CreateExamRequest> for ExamDraft {
    fn from(req: CreateExamRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            exam_type: req.exam_type.trim().to_string(),
            exam_format: req.exam_format,
            total_marks: req.total_marks,
            duration: req.duration,
            start_date: req.start_date.trim().to_string(),
            start_time: req.start_time,
            venue: req.venue,
            description: req.description,
            status: req.status.unwrap_or(ExamStatus::Draft),
            category: req.category.trim().to_string(),
            set_type: normalize_set_type(req.set_type),
        }
    }
}

impl ExamDraft {
    /// 以现有考试为底，叠加更新请求中提供的字段
    pub fn merged(existing: &super::entities::Exam, update: &UpdateExamRequest) -> Self {
        Self {
            title: update
                .title
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| existing.title.clone()),
            exam_type: update
                .exam_type
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| existing.exam_type.clone()),
            exam_format: update.exam_format.unwrap_or(existing.exam_format),
            total_marks: update.total_marks.unwrap_or(existing.total_marks),
            duration: update.duration.unwrap_or(existing.duration),
            start_date: update
                .start_date
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| existing.start_date.clone()),
            start_time: update
                .start_time
                .clone()
                .or_else(|| existing.start_time.clone()),
            venue: update.venue.clone().or_else(|| existing.venue.clone()),
            description: update
                .description
                .clone()
                .or_else(|| existing.description.clone()),
            status: update.status.unwrap_or(existing.status),
            category: update
                .category
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| existing.category.clone()),
            set_type: match update.set_type {
                Some(ref s) => normalize_set_type(Some(s.clone())),
                None => existing.set_type.clone(),
            },
        }
    }

    pub fn set_key(&self) -> Option<super::entities::ExamSetKey> {
        if !self.is_realtime() {
            return None;
        }
        self.set_type
            .as_ref()
            .map(|set_type| super::entities::ExamSetKey {
                title: self.title.clone(),
                start_date: self.start_date.clone(),
                category: self.category.clone(),
                set_type: set_type.clone(),
            })
    }
}

// 空字符串视为未设置
fn normalize_set_type(set_type: Option<String>) -> Option<String> {
    set_type
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ExamDraft {
        ExamDraft {
            title: "Mock Test 1".into(),
            exam_type: "IIT".into(),
            exam_format: ExamFormat::Comprehensive,
            total_marks: 300,
            duration: 180,
            start_date: "2025-06-01".into(),
            start_time: Some("09:30".into()),
            venue: None,
            description: None,
            status: ExamStatus::Draft,
            category: "realtime".into(),
            set_type: Some("A".into()),
        }
    }

    fn subject(name: &str, marks: i32) -> ExamSubjectInput {
        ExamSubjectInput {
            id: None,
            subject: name.into(),
            marks,
        }
    }

    #[test]
    fn test_valid_draft() {
        let subjects = vec![
            subject("Physics", 100),
            subject("Chemistry", 100),
            subject("Mathematics", 100),
        ];
        assert!(draft().validate(Some(&subjects)).is_ok());
    }

    #[test]
    fn test_realtime_requires_set_type() {
        let mut d = draft();
        d.set_type = None;
        assert!(d.validate(None).is_err());

        d.category = "practice".into();
        assert!(d.validate(None).is_ok());
        assert!(d.set_key().is_none());
    }

    #[test]
    fn test_bad_date_and_time() {
        let mut d = draft();
        d.start_date = "01/06/2025".into();
        assert!(d.validate(None).is_err());

        let mut d = draft();
        d.start_time = Some("9am".into());
        assert!(d.validate(None).is_err());
    }

    #[test]
    fn test_subject_rules() {
        assert!(validate_subjects(&[subject("Physics", 200), subject("Biology", 101)], 300).is_err());
        assert!(validate_subjects(&[subject("Physics", 10), subject("physics ", 10)], 300).is_err());
        assert!(validate_subjects(&[subject("  ", 10)], 300).is_err());
        assert!(validate_subjects(&[subject("Physics", -1)], 300).is_err());
        assert!(validate_subjects(&[], 300).is_ok());
    }

    #[test]
    fn test_create_request_normalizes_empty_set_type() {
        let req: CreateExamRequest = serde_json::from_value(serde_json::json!({
            "title": " Mock ",
            "exam_type": "NEET",
            "exam_format": "single",
            "total_marks": 100,
            "duration": 60,
            "start_date": "2025-01-01",
            "category": "practice",
            "set_type": "  "
        }))
        .unwrap();
        let d = ExamDraft::from(req);
        assert_eq!(d.title, "Mock");
        assert_eq!(d.set_type, None);
        assert_eq!(d.status, ExamStatus::Draft);
    }
}
