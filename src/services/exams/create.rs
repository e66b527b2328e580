use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, duplicate_set_response};
use crate::errors::ExamAdminError;
use crate::middlewares::RequireJWT;
use crate::models::exams::requests::{CreateExamRequest, ExamDraft};
use crate::models::exams::responses::ExamCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    create_request: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subjects = create_request.subjects.clone();
    let draft = ExamDraft::from(create_request);
    if let Err(e) = draft.validate(Some(&subjects)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamValidationFailed,
            e.message(),
        )));
    }

    // 同组同 set_type 的实时考试只能有一份，唯一索引兜底并发
    if let Some(key) = draft.set_key() {
        match storage.find_exam_set_conflict(&key, None).await {
            Ok(Some(_)) => return Ok(duplicate_set_response()),
            Ok(None) => {}
            Err(e) => return Ok(error_response(&e)),
        }
    }

    let created_by = RequireJWT::extract_user_id(request);
    match storage.create_exam(draft, subjects, created_by).await {
        Ok(exam) => {
            tracing::info!("Exam {} created by {:?}", exam.exam.id, created_by);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ExamCreatedResponse {
                    exam_id: exam.exam.id,
                    exam,
                },
                "Exam created successfully",
            )))
        }
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_set_response()),
        Err(e) => Ok(error_response(&e)),
    }
}
