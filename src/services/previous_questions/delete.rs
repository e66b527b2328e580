use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PreviousQuestionService, previous_question_not_found};
use crate::errors::ExamAdminError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};

/// 仅上传者本人可删除，管理员也不例外
pub async fn delete_previous_question(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(requester_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized_response());
    };

    match storage.delete_previous_question(id, requester_id).await {
        Ok(true) => {
            tracing::info!("Previous question set {} deleted by {}", id, requester_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Previous question set deleted successfully",
            )))
        }
        Ok(false) => Ok(previous_question_not_found()),
        Err(ExamAdminError::Authorization(_)) => {
            tracing::warn!(
                "User {} tried to delete previous question set {} owned by someone else",
                requester_id,
                id
            );
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PreviousQuestionPermissionDenied,
                "Only the uploader can delete this previous question set",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
