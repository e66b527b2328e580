use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::roles::entities::permissions;
use crate::services::AnnouncementService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AnnouncementService 实例
static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    query: web::Query<AnnouncementListParams>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .list_announcements(&req, query.into_inner())
        .await
}

pub async fn create_announcement(
    req: HttpRequest,
    announcement: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .create_announcement(&req, announcement.into_inner())
        .await
}

pub async fn get_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.get_announcement(&req, id.0).await
}

pub async fn update_announcement(
    req: HttpRequest,
    id: SafeIDI64,
    announcement: web::Json<UpdateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .update_announcement(&req, id.0, announcement.into_inner())
        .await
}

pub async fn delete_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.delete_announcement(&req, id.0).await
}

pub async fn list_active(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.list_active(&req).await
}

pub async fn record_view(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.record_view(&req, id.0).await
}

pub async fn upload_media(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.upload_media(&req, payload).await
}

// 配置路由
pub fn configure_announcement_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/announcements")
            .wrap(middlewares::RequireJWT)
            // 所有已登录用户可用
            .route("/active", web::get().to(list_active))
            .route("/{id}/view", web::post().to(record_view))
            .service(
                web::scope("")
                    .wrap(middlewares::RequirePermission::by_method(
                        permissions::ANNOUNCEMENTS_READ,
                        permissions::ANNOUNCEMENTS_WRITE,
                    ))
                    .service(
                        web::resource("/upload")
                            .wrap(middlewares::RateLimit::upload())
                            .route(web::post().to(upload_media)),
                    )
                    .route("", web::get().to(list_announcements))
                    .route("", web::post().to(create_announcement))
                    .route("/{id}", web::get().to(get_announcement))
                    .route("/{id}", web::put().to(update_announcement))
                    .route("/{id}", web::delete().to(delete_announcement)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::models::users::entities::role_names;
    use crate::storage::Storage;
    use crate::test_support::{create_user_with_role, storage};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    fn bearer(user_id: i64, role: &str) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(user_id, role).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_media_check_and_audience_visibility() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        let student = create_user_with_role(&storage, "cand01", role_names::STUDENT).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_announcement_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/announcements")
            .insert_header(bearer(admin.id, &admin.role))
            .set_json(serde_json::json!({
                "title": "Hall tickets",
                "content": "Download from the portal",
                "media_url": "https://cdn.example.com/ticket.bmp"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::MediaUrlInvalid as i32);

        let req = test::TestRequest::post()
            .uri("/api/announcements")
            .insert_header(bearer(admin.id, &admin.role))
            .set_json(serde_json::json!({
                "title": "Hall tickets",
                "content": "Download from the portal",
                "media_url": "/uploads/media/1700000000-ticket.png",
                "status": "published",
                "target_audience": "students"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_i64().unwrap();

        // 学生可见，管理员受众不含 students
        let req = test::TestRequest::get()
            .uri("/api/announcements/active")
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get()
            .uri("/api/announcements/active")
            .insert_header(bearer(admin.id, &admin.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));

        let req = test::TestRequest::post()
            .uri(&format!("/api/announcements/{id}/view"))
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["views"], 1);

        // 学生没有管理权限
        let req = test::TestRequest::get()
            .uri("/api/announcements")
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
