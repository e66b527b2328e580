use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission};
use crate::models::help::requests::{
    CreateTicketRequest, FaqRequest, TicketListParams, UpdateTicketRequest,
};
use crate::models::roles::entities::permissions;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::HelpService;
use crate::utils::SafeIDI64;

// 懒加载的全局 HelpService 实例
static HELP_SERVICE: Lazy<HelpService> = Lazy::new(HelpService::new_lazy);

/// 同一路径上读写权限不同，写操作在处理程序内单独检查
async fn deny_unless_manager(req: &HttpRequest) -> Option<HttpResponse> {
    match RequirePermission::check(req, permissions::HELP_MANAGE).await {
        Ok(true) => None,
        Ok(false) => Some(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You do not have permission to perform this action",
        ))),
        Err(e) => Some(crate::services::error_response(&e)),
    }
}

pub async fn list_faqs(req: HttpRequest) -> ActixResult<HttpResponse> {
    HELP_SERVICE.list_faqs(&req).await
}

pub async fn create_faq(
    req: HttpRequest,
    body: web::Json<FaqRequest>,
) -> ActixResult<HttpResponse> {
    if let Some(denied) = deny_unless_manager(&req).await {
        return Ok(denied);
    }
    HELP_SERVICE.create_faq(&req, body.into_inner()).await
}

pub async fn update_faq(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<FaqRequest>,
) -> ActixResult<HttpResponse> {
    HELP_SERVICE.update_faq(&req, id.0, body.into_inner()).await
}

pub async fn delete_faq(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    HELP_SERVICE.delete_faq(&req, id.0).await
}

pub async fn create_ticket(
    req: HttpRequest,
    body: web::Json<CreateTicketRequest>,
) -> ActixResult<HttpResponse> {
    HELP_SERVICE.create_ticket(&req, body.into_inner()).await
}

pub async fn list_tickets(
    req: HttpRequest,
    query: web::Query<TicketListParams>,
) -> ActixResult<HttpResponse> {
    if let Some(denied) = deny_unless_manager(&req).await {
        return Ok(denied);
    }
    HELP_SERVICE.list_tickets(&req, query.into_inner()).await
}

pub async fn list_my_tickets(
    req: HttpRequest,
    query: web::Query<TicketListParams>,
) -> ActixResult<HttpResponse> {
    HELP_SERVICE.list_my_tickets(&req, query.into_inner()).await
}

pub async fn update_ticket(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTicketRequest>,
) -> ActixResult<HttpResponse> {
    HELP_SERVICE
        .update_ticket(&req, id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_help_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/help")
            .wrap(middlewares::RequireJWT)
            .route("/faqs", web::get().to(list_faqs))
            .route("/faqs", web::post().to(create_faq))
            .route("/tickets", web::post().to(create_ticket))
            .route("/tickets", web::get().to(list_tickets))
            .route("/tickets/mine", web::get().to(list_my_tickets))
            .service(
                web::scope("")
                    .wrap(middlewares::RequirePermission::new(permissions::HELP_MANAGE))
                    .route("/faqs/{id}", web::put().to(update_faq))
                    .route("/faqs/{id}", web::delete().to(delete_faq))
                    .route("/tickets/{id}", web::put().to(update_ticket)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_mixed_permissions_on_shared_paths() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        let student = create_user_with_role(&storage, "cand01", role_names::STUDENT).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_help_routes),
        )
        .await;

        let faq = serde_json::json!({
            "question": "How do I reset my password?",
            "answer": "Contact the exam cell."
        });
        let req = test::TestRequest::post()
            .uri("/api/help/faqs")
            .insert_header(bearer(student.id, &student.role))
            .set_json(&faq)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/help/faqs")
            .insert_header(bearer(admin.id, &admin.role))
            .set_json(&faq)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/help/faqs")
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/help/tickets")
            .insert_header(bearer(student.id, &student.role))
            .set_json(serde_json::json!({"subject": "Admit card", "message": "Not received"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/help/tickets")
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/help/tickets/mine")
            .insert_header(bearer(student.id, &student.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get()
            .uri("/api/help/tickets?status=open")
            .insert_header(bearer(admin.id, &admin.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    }
}
