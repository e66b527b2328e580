use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SettingService;
use crate::middlewares::RequireJWT;
use crate::models::settings::requests::{BatchUpdateSettingsRequest, UpdateSettingRequest};
use crate::models::settings::responses::SettingListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::extractor::is_valid_setting_key;

/// 写入单个设置，不存在则创建
pub async fn update_setting(
    service: &SettingService,
    request: &HttpRequest,
    key: &str,
    update_request: UpdateSettingRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let updated_by = RequireJWT::extract_user_id(request);

    match storage
        .upsert_setting(key, update_request.value, updated_by)
        .await
    {
        Ok(setting) => {
            tracing::info!("Setting {} updated by {:?}", key, updated_by);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                setting,
                "Setting updated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_settings(
    service: &SettingService,
    request: &HttpRequest,
    batch: BatchUpdateSettingsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if batch.settings.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "No settings provided",
        )));
    }
    if let Some(bad) = batch.settings.keys().find(|k| !is_valid_setting_key(k)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid setting key: {bad}"),
        )));
    }

    let updated_by = RequireJWT::extract_user_id(request);
    let count = batch.settings.len();
    match storage.upsert_settings(batch.settings, updated_by).await {
        Ok(items) => {
            tracing::info!("{} settings updated by {:?}", count, updated_by);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SettingListResponse { items },
                "Settings updated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
