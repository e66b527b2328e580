use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::ApiResponse;
use crate::models::exams::requests::ExamListParams;
use crate::services::error_response;

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    params: ExamListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exams(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exams retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
