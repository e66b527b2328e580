use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, duplicate_set_response, exam_not_found};
use crate::errors::ExamAdminError;
use crate::middlewares::RequireJWT;
use crate::models::exams::entities::ExamStatus;
use crate::models::exams::requests::{CreateSetRequest, ExamDraft, ExamSubjectInput};
use crate::models::exams::responses::{ExamCreatedResponse, ExamSetsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_sets(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let exam = match storage.get_exam(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => return Ok(exam_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.list_exam_sets(&exam).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamSetsResponse { items },
            "Exam sets retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 复制考试与科目为新的一套试卷，题目不复制，状态重置为草稿
pub async fn create_set(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    set_request: CreateSetRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let source = match storage.get_exam_detail(exam_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Ok(exam_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    let set_type = set_request.set_type.trim();
    if set_type.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamValidationFailed,
            "Set type is required",
        )));
    }

    let exam = source.exam;
    let draft = ExamDraft {
        title: exam.title,
        exam_type: exam.exam_type,
        exam_format: exam.exam_format,
        total_marks: exam.total_marks,
        duration: exam.duration,
        start_date: exam.start_date,
        start_time: exam.start_time,
        venue: exam.venue,
        description: exam.description,
        status: ExamStatus::Draft,
        category: exam.category,
        set_type: Some(set_type.to_string()),
    };
    let subjects: Vec<ExamSubjectInput> = source
        .subjects
        .into_iter()
        .map(|s| ExamSubjectInput {
            id: None,
            subject: s.subject,
            marks: s.marks,
        })
        .collect();

    if let Err(e) = draft.validate(Some(&subjects)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamValidationFailed,
            e.message(),
        )));
    }

    if let Some(key) = draft.set_key() {
        match storage.find_exam_set_conflict(&key, None).await {
            Ok(Some(_)) => return Ok(duplicate_set_response()),
            Ok(None) => {}
            Err(e) => return Ok(error_response(&e)),
        }
    }

    let created_by = RequireJWT::extract_user_id(request);
    match storage.create_exam(draft, subjects, created_by).await {
        Ok(exam) => Ok(HttpResponse::Created().json(ApiResponse::success(
            ExamCreatedResponse {
                exam_id: exam.exam.id,
                exam,
            },
            "Exam set created successfully",
        ))),
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_set_response()),
        Err(e) => Ok(error_response(&e)),
    }
}
