use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::roles::entities::permissions;
use crate::models::settings::requests::{BatchUpdateSettingsRequest, UpdateSettingRequest};
use crate::services::SettingService;
use crate::utils::SafeSettingKey;

// 懒加载的全局 SettingService 实例
static SETTING_SERVICE: Lazy<SettingService> = Lazy::new(SettingService::new_lazy);

pub async fn list_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    SETTING_SERVICE.list_settings(&req).await
}

pub async fn update_settings(
    req: HttpRequest,
    body: web::Json<BatchUpdateSettingsRequest>,
) -> ActixResult<HttpResponse> {
    SETTING_SERVICE.update_settings(&req, body.into_inner()).await
}

pub async fn get_setting(req: HttpRequest, key: SafeSettingKey) -> ActixResult<HttpResponse> {
    SETTING_SERVICE.get_setting(&req, &key.0).await
}

pub async fn update_setting(
    req: HttpRequest,
    key: SafeSettingKey,
    body: web::Json<UpdateSettingRequest>,
) -> ActixResult<HttpResponse> {
    SETTING_SERVICE
        .update_setting(&req, &key.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_setting_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/settings")
            .wrap(middlewares::RequirePermission::by_method(
                permissions::SETTINGS_READ,
                permissions::SETTINGS_WRITE,
            ))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_settings))
            .route("", web::put().to(update_settings))
            .route("/{key}", web::get().to(get_setting))
            .route("/{key}", web::put().to(update_setting)),
    );
}
