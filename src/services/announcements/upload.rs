use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response_as;
use crate::services::uploads::{object_storage_from, receive_single_file, store_upload};

/// 上传公告图片，返回可直接写入 media_url 的地址
pub async fn upload_media(
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let file = match receive_single_file(
        &mut payload,
        &config.upload.media_types,
        config.upload.max_size,
    )
    .await
    {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let object_storage = object_storage_from(request);
    match store_upload(object_storage.as_ref(), "media", &file).await {
        Ok(uploaded) => {
            tracing::info!("Announcement media stored at {}", uploaded.key);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                uploaded,
                "Media uploaded successfully",
            )))
        }
        Err(e) => Ok(error_response_as(ErrorCode::FileUploadFailed, &e)),
    }
}
