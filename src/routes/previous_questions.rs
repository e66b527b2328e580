use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::previous_questions::requests::{
    CreatePreviousQuestionRequest, PreviousQuestionListParams,
};
use crate::models::roles::entities::permissions;
use crate::services::PreviousQuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PreviousQuestionService 实例
static PREVIOUS_QUESTION_SERVICE: Lazy<PreviousQuestionService> =
    Lazy::new(PreviousQuestionService::new_lazy);

pub async fn list_previous_questions(
    req: HttpRequest,
    query: web::Query<PreviousQuestionListParams>,
) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE
        .list(&req, query.into_inner())
        .await
}

pub async fn create_previous_question(
    req: HttpRequest,
    body: web::Json<CreatePreviousQuestionRequest>,
) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE
        .create(&req, body.into_inner())
        .await
}

pub async fn upload_document(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE.upload(&req, payload).await
}

pub async fn get_previous_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE.get(&req, id.0).await
}

pub async fn delete_previous_question(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE.delete(&req, id.0).await
}

pub async fn preview(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE.preview(&req, id.0).await
}

pub async fn download(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PREVIOUS_QUESTION_SERVICE.download(&req, id.0).await
}

// 配置路由
pub fn configure_previous_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/previous-questions")
            .wrap(middlewares::RequirePermission::by_method(
                permissions::PREVIOUS_QUESTIONS_READ,
                permissions::PREVIOUS_QUESTIONS_WRITE,
            ))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .wrap(middlewares::RateLimit::upload())
                    .route(web::post().to(upload_document)),
            )
            .route("", web::get().to(list_previous_questions))
            .route("", web::post().to(create_previous_question))
            .route("/{id}", web::get().to(get_previous_question))
            .route("/{id}", web::delete().to(delete_previous_question))
            .route("/{id}/preview", web::get().to(preview))
            .route("/{id}/download", web::get().to(download)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::models::users::entities::role_names;
    use crate::object_storage::ObjectStorage;
    use crate::object_storage::local::LocalObjectStorage;
    use crate::storage::Storage;
    use crate::test_support::{create_user_with_role, storage, temp_root};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    fn bearer(user_id: i64, role: &str) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(user_id, role).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_owner_only_delete_and_local_download() {
        let storage = storage().await;
        let owner = create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        let other = create_user_with_role(&storage, "staff02", role_names::SUPER_ADMIN).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();

        let objects: Arc<dyn ObjectStorage> =
            Arc::new(LocalObjectStorage::with_root(temp_root("pq"), "/uploads"));
        objects
            .put("documents/1700000000-paper.pdf", b"%PDF-1.4 sample", "application/pdf")
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .app_data(web::Data::new(objects))
                .configure(configure_previous_question_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/previous-questions")
            .insert_header(bearer(owner.id, &owner.role))
            .set_json(serde_json::json!({
                "course": "NEET",
                "subject_mode": "multiple",
                "subjects": ["Physics", "Biology"],
                "exam_conducted_on": "2024-05-05",
                "resource_url": "/uploads/documents/1700000000-paper.pdf"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/previous-questions/{id}/preview"))
            .insert_header(bearer(other.id, &other.role))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["proxied"], true);

        let req = test::TestRequest::get()
            .uri(&format!("/api/previous-questions/{id}/download"))
            .insert_header(bearer(other.id, &other.role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..], b"%PDF-1.4 sample");

        // 超级管理员也不能删除他人上传的真题
        let req = test::TestRequest::delete()
            .uri(&format!("/api/previous-questions/{id}"))
            .insert_header(bearer(other.id, &other.role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::PreviousQuestionPermissionDenied as i32);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/previous-questions/{id}"))
            .insert_header(bearer(owner.id, &owner.role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/previous-questions/{id}"))
            .insert_header(bearer(owner.id, &owner.role))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
