use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PreviousQuestionService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::previous_questions::requests::CreatePreviousQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{object_storage_from, receive_single_file, store_upload};
use crate::services::{error_response, error_response_as, unauthorized_response};

pub async fn create_previous_question(
    service: &PreviousQuestionService,
    request: &HttpRequest,
    create_request: CreatePreviousQuestionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(uploaded_by) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized_response());
    };

    let draft = match create_request.into_draft(uploaded_by) {
        Ok(draft) => draft,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.create_previous_question(draft).await {
        Ok(set) => {
            tracing::info!("Previous question set {} uploaded by {}", set.id, uploaded_by);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                set,
                "Previous question set created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 上传真题文档，返回的 url 用作 resource_url
pub async fn upload_document(
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let file = match receive_single_file(
        &mut payload,
        &config.upload.document_types,
        config.upload.max_size,
    )
    .await
    {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let object_storage = object_storage_from(request);
    match store_upload(object_storage.as_ref(), "documents", &file).await {
        Ok(uploaded) => Ok(HttpResponse::Created().json(ApiResponse::success(
            uploaded,
            "Document uploaded successfully",
        ))),
        Err(e) => Ok(error_response_as(ErrorCode::FileUploadFailed, &e)),
    }
}
