use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SettingService;
use crate::models::settings::responses::SettingListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_settings(
    service: &SettingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_settings().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SettingListResponse { items },
            "Settings retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_setting(
    service: &SettingService,
    request: &HttpRequest,
    key: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_setting(key).await {
        Ok(Some(setting)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            setting,
            "Setting retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingNotFound,
            format!("Setting '{key}' not found"),
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
