use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::requests::ResultsParams;
use crate::models::results::responses::ResultSummaryResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn summarize_results(
    service: &ResultService,
    request: &HttpRequest,
    params: ResultsParams,
) -> ActixResult<HttpResponse> {
    let window = match params.window() {
        Ok(window) => window,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                e.message(),
            )));
        }
    };

    match service.get_storage(request).summarize_results(window).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResultSummaryResponse { items },
            "Result summary retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
