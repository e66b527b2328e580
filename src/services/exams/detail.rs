use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, exam_not_found};
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_detail(exam_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Exam retrieved successfully",
        ))),
        Ok(None) => Ok(exam_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
