use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, duplicate_set_response, exam_not_found};
use crate::errors::ExamAdminError;
use crate::models::exams::requests::{ExamDraft, ExamSubjectInput, UpdateExamRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    update_request: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_exam_detail(exam_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Ok(exam_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    // 未重新提交科目时，已存科目的分值也要落在新的总分内
    let stored_subjects: Vec<ExamSubjectInput> = existing
        .subjects
        .iter()
        .map(|s| ExamSubjectInput {
            id: Some(s.id),
            subject: s.subject.clone(),
            marks: s.marks,
        })
        .collect();
    let subjects = update_request.subjects.as_deref().unwrap_or(&stored_subjects);

    // 合并后整体校验，实时考试约束对合并结果生效
    let draft = ExamDraft::merged(&existing.exam, &update_request);
    if let Err(e) = draft.validate(Some(subjects)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamValidationFailed,
            e.message(),
        )));
    }

    if let Some(key) = draft.set_key() {
        match storage.find_exam_set_conflict(&key, Some(exam_id)).await {
            Ok(Some(_)) => return Ok(duplicate_set_response()),
            Ok(None) => {}
            Err(e) => return Ok(error_response(&e)),
        }
    }

    match storage
        .update_exam(exam_id, draft, update_request.subjects)
        .await
    {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Exam updated successfully",
        ))),
        Ok(None) => Ok(exam_not_found()),
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_set_response()),
        Err(e) => Ok(error_response(&e)),
    }
}
