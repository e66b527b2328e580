use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::LoginRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(
                web::resource("/login")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(middlewares::RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_user)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::test_support::{new_student, storage};
    use crate::utils::password::hash_password;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_login_me_and_refresh() {
        let storage = storage().await;
        let mut candidate = new_student("cand01", "S-1001");
        candidate.password_hash = hash_password("Secret123").unwrap();
        let candidate = storage.create_user(candidate).await.unwrap();
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({"login": "S-1001", "password": "wrong-pass1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        // 学号、邮箱都可以作为登录名
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": "cand01@example.com",
                "password": "Secret123",
                "remember_me": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let refresh_cookie = resp
            .response()
            .cookies()
            .next()
            .map(|c| c.into_owned())
            .unwrap();
        assert!(refresh_cookie.http_only().unwrap_or(false));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user"]["id"], candidate.id);
        let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {access_token}")))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user"]["username"], "cand01");

        let req = test::TestRequest::post()
            .uri("/api/auth/refresh")
            .cookie(refresh_cookie)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"]["access_token"].as_str().is_some_and(|t| !t.is_empty()));

        let req = test::TestRequest::post().uri("/api/auth/refresh").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
