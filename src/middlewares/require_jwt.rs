/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，解析出当前用户
 * 并放入请求扩展，供后续中间件与处理程序使用。
 *
 * ```rust,ignore
 * web::scope("/api/exams")
 *     .wrap(RequirePermission::by_method(EXAMS_READ, EXAMS_WRITE))
 *     .wrap(RequireJWT)
 * ```
 *
 * 用户信息按 `user:{id}` 缓存，学生资料变更或删除时需调用
 * [`RequireJWT::forget_user`] 使缓存失效。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::{ExamAdminError, Result};
use crate::models::{ErrorCode, users::entities::User};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

pub(crate) fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// 校验 token 并解析用户，优先读缓存
async fn resolve_principal(req: &ServiceRequest) -> Result<User> {
    let token = bearer_token(req)
        .ok_or_else(|| ExamAdminError::authentication("Missing or invalid Authorization header"))?;
    let user_id = JwtUtils::verify_access_token(token)?.user_id()?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let key = user_cache_key(user_id);

    if let Some(ref cache) = cache
        && let CacheResult::Found(user) = cache.get_json::<User>(&key).await
    {
        return ensure_active(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| ExamAdminError::database_config("Storage not found in app data"))?
        .get_ref()
        .clone();
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ExamAdminError::authentication("User not found"))?;

    if let Some(cache) = cache {
        cache.insert_json(key, &user, 0).await;
    }
    ensure_active(user)
}

fn ensure_active(user: User) -> Result<User> {
    if user.is_active() {
        Ok(user)
    } else {
        Err(ExamAdminError::authentication("User is not active"))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检直接放行
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match resolve_principal(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    if !err.is_client_facing() {
                        tracing::error!("Failed to resolve principal: {}", err);
                    }
                    info!("JWT authentication failed for {}: {}", req.path(), err.message());
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Unauthorized",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前请求的用户，仅在 RequireJWT 之后可用
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &HttpRequest) -> Option<String> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }

    /// 用户资料变化后清掉缓存的用户信息
    pub async fn forget_user(req: &HttpRequest, user_id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&user_cache_key(user_id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::entities::{UserStatus, role_names};
    use crate::models::users::requests::UserChanges;
    use crate::test_support::{create_user_with_role, storage};
    use actix_web::{App, HttpResponse, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(RequireJWT::extract_user(&req).map(|u| u.username).unwrap_or_default())
    }

    #[actix_web::test]
    async fn test_bearer_token_resolves_user() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "proctor", role_names::ADMIN).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .app_data(web::Data::new(cache.clone()))
                .service(web::scope("/api").wrap(RequireJWT).route("/me", web::get().to(whoami))),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let token = JwtUtils::generate_access_token(admin.id, &admin.role).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "proctor");
        assert!(matches!(
            cache.get_raw(&user_cache_key(admin.id)).await,
            CacheResult::Found(_)
        ));

        // refresh token 不能当作 access token 使用
        let refresh = JwtUtils::generate_refresh_token(admin.id, &admin.role, None).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {refresh}")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_suspended_user_rejected() {
        let storage = storage().await;
        let student = create_user_with_role(&storage, "suspended1", role_names::STUDENT).await;
        storage
            .update_user(
                student.id,
                UserChanges {
                    status: Some(UserStatus::Suspended),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let dyn_storage: Arc<dyn Storage> = storage.clone();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .service(web::scope("/api").wrap(RequireJWT).route("/me", web::get().to(whoami))),
        )
        .await;

        let token = JwtUtils::generate_access_token(student.id, &student.role).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
