use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UploadService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::file_magic::content_type_for;

pub async fn serve_object(
    service: &UploadService,
    request: &HttpRequest,
    key: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_object_storage(request);

    let extension = key
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| format!(".{ext}"))
        .unwrap_or_default();

    match storage.get(key).await {
        Ok(Some(bytes)) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(&extension))
            .insert_header(("X-Content-Type-Options", "nosniff"))
            .body(bytes)),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
