use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PreviousQuestionService, previous_question_not_found};
use crate::models::ApiResponse;
use crate::models::previous_questions::requests::PreviousQuestionListParams;
use crate::services::error_response;

pub async fn list_previous_questions(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    params: PreviousQuestionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_previous_questions(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Previous question sets retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_previous_question(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_previous_question(id).await {
        Ok(Some(set)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            set,
            "Previous question set retrieved successfully",
        ))),
        Ok(None) => Ok(previous_question_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
