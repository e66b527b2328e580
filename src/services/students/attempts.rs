use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_not_found};
use crate::models::students::requests::{RecordAttemptRequest, RegisterExamRequest};
use crate::models::students::responses::StudentExamsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

fn exam_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ExamNotFound,
        "Exam not found",
    ))
}

pub async fn list_attempts(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.list_student_attempts(id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentExamsResponse { items },
            "Student exams retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 报名考试，重复报名返回已有记录
pub async fn register_exam(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    register_request: RegisterExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }
    match storage.get_exam(register_request.exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(exam_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage
        .register_student_exam(id, register_request.exam_id)
        .await
    {
        Ok(attempt) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attempt,
            "Student registered for exam",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn record_exam(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    exam_id: i64,
    record: RecordAttemptRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.record_student_exam(id, exam_id, record).await {
        Ok(Some(attempt)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attempt,
            "Exam result recorded successfully",
        ))),
        Ok(None) => Ok(exam_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
