use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, exam_not_found};
use crate::models::questions::requests::{QuestionDraft, QuestionRequest};
use crate::models::questions::responses::QuestionListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

fn question_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::QuestionNotFound,
        "Question not found",
    ))
}

fn invalid_question(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::QuestionValidationFailed,
        message,
    ))
}

/// 题目列表，附带题目分值合计与考试总分
pub async fn list_questions(
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

    match storage.list_questions(exam_id).await {
        Ok(items) => {
            let total_question_marks = items.iter().map(|q| q.marks as i64).sum();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuestionListResponse {
                    items,
                    total_question_marks,
                    exam_total_marks: exam.total_marks,
                },
                "Questions retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_question(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    question: QuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let draft = match QuestionDraft::try_from(question) {
        Ok(draft) => draft,
        Err(e) => return Ok(invalid_question(e.message())),
    };

    match storage.get_exam(exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(exam_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.create_question(exam_id, draft).await {
        Ok(question) => Ok(HttpResponse::Created().json(ApiResponse::success(
            question,
            "Question created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 更新题目，选项整体替换
pub async fn update_question(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    question_id: i64,
    question: QuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let draft = match QuestionDraft::try_from(question) {
        Ok(draft) => draft,
        Err(e) => return Ok(invalid_question(e.message())),
    };

    match storage.update_question(exam_id, question_id, draft).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question updated successfully",
        ))),
        Ok(None) => Ok(question_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_question(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_question(exam_id, question_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Question deleted successfully",
        ))),
        Ok(false) => Ok(question_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
