/*!
 * 权限中间件
 *
 * 必须放在 RequireJWT 之后（actix 中后 wrap 的先执行，所以写在 RequireJWT 之前）。
 * 根据当前用户的角色名读取 roles 表中的权限集合进行校验，角色信息按
 * `role:{name}` 缓存，角色被修改或删除时需调用 [`RequirePermission::forget_role`]。
 *
 * ```rust,ignore
 * web::scope("/api/results")
 *     .wrap(RequirePermission::new(permissions::RESULTS_READ))
 *     .wrap(RequireJWT)
 * ```
 */

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
use tracing::{error, info};

use super::create_error_response;
use crate::cache::{CacheResult, ObjectCache};
use crate::errors::{ExamAdminError, Result};
use crate::models::{ErrorCode, roles::entities::Role, users::entities::User};
use crate::storage::Storage;

pub(crate) fn role_cache_key(name: &str) -> String {
    format!("role:{name}")
}

#[derive(Clone)]
enum Requirement {
    Always(&'static str),
    // GET/HEAD 使用 read，其余方法使用 write
    ByMethod {
        read: &'static str,
        write: &'static str,
    },
}

impl Requirement {
    fn for_method(&self, method: &Method) -> &'static str {
        match self {
            Requirement::Always(p) => p,
            Requirement::ByMethod { read, write } => {
                if method == Method::GET || method == Method::HEAD {
                    read
                } else {
                    write
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct RequirePermission {
    requirement: Requirement,
}

impl RequirePermission {
    pub fn new(permission: &'static str) -> Self {
        Self {
            requirement: Requirement::Always(permission),
        }
    }

    pub fn by_method(read: &'static str, write: &'static str) -> Self {
        Self {
            requirement: Requirement::ByMethod { read, write },
        }
    }

    pub async fn forget_role(req: &HttpRequest, name: &str) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&role_cache_key(name)).await;
        }
    }

    /// 处理程序内的细粒度检查，例如只读路由上的单个写操作
    pub async fn check(req: &HttpRequest, permission: &str) -> Result<bool> {
        let Some(user) = req.extensions().get::<User>().cloned() else {
            return Ok(false);
        };
        let cache = req
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|c| c.get_ref().clone());
        let storage = req
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .ok_or_else(|| ExamAdminError::database_config("Storage not found in app data"))?
            .get_ref()
            .clone();

        Ok(load_role(&storage, cache.as_ref(), &user.role)
            .await?
            .is_some_and(|role| role.grants(permission)))
    }
}

async fn load_role(
    storage: &Arc<dyn Storage>,
    cache: Option<&Arc<dyn ObjectCache>>,
    name: &str,
) -> Result<Option<Role>> {
    let key = role_cache_key(name);
    if let Some(cache) = cache
        && let CacheResult::Found(role) = cache.get_json::<Role>(&key).await
    {
        return Ok(Some(role));
    }

    let role = storage.get_role_by_name(name).await?;
    if let (Some(cache), Some(role)) = (cache, role.as_ref()) {
        cache.insert_json(key, role, 0).await;
    }
    Ok(role)
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            requirement: self.requirement.clone(),
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    requirement: Requirement,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
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
        let permission = self.requirement.for_method(req.method());

        Box::pin(async move {
            let principal = req.extensions().get::<User>().cloned();
            let Some(user) = principal else {
                info!("Permission check without principal; RequireJWT must run first");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let Some(storage) = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|s| s.get_ref().clone())
            else {
                error!("Storage not found in app data");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Internal server error",
                    )
                    .map_into_right_body(),
                ));
            };
            let cache = req
                .app_data::<web::Data<Arc<dyn ObjectCache>>>()
                .map(|c| c.get_ref().clone());

            match load_role(&storage, cache.as_ref(), &user.role).await {
                Ok(Some(role)) if role.grants(permission) => {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Ok(_) => {
                    info!(
                        "Access denied for user {} (role: {}), missing permission {}",
                        user.id, user.role, permission
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(e) => {
                    error!("Failed to load role {}: {}", user.role, e);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middlewares::RequireJWT;
    use crate::models::roles::entities::permissions;
    use crate::models::users::entities::role_names;
    use crate::test_support::{create_user_with_role, storage};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, HttpResponse, test};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_permission_by_method() {
        let storage = storage().await;
        let student = create_user_with_role(&storage, "cand01", role_names::STUDENT).await;
        let admin = create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        let reader = storage
            .create_role("reader", None, vec![permissions::EXAMS_READ.into()])
            .await
            .unwrap();
        let viewer = create_user_with_role(&storage, "viewer01", &reader.name).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();

        let app = test::init_service(
            App::new().app_data(web::Data::new(dyn_storage)).service(
                web::scope("/api/exams")
                    .wrap(RequirePermission::by_method(
                        permissions::EXAMS_READ,
                        permissions::EXAMS_WRITE,
                    ))
                    .wrap(RequireJWT)
                    .route("", web::get().to(ok))
                    .route("", web::post().to(ok)),
            ),
        )
        .await;

        let call = |user_id: i64, role: &str, method: Method| {
            let token = JwtUtils::generate_access_token(user_id, role).unwrap();
            test::TestRequest::default()
                .method(method)
                .uri("/api/exams")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request()
        };

        let resp = test::call_service(&app, call(student.id, &student.role, Method::GET)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(&app, call(admin.id, &admin.role, Method::POST)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, call(viewer.id, &viewer.role, Method::GET)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, call(viewer.id, &viewer.role, Method::POST)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
