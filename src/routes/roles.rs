use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::roles::entities::permissions;
use crate::models::roles::requests::{CreateRoleRequest, UpdateRoleRequest};
use crate::services::RoleService;
use crate::utils::SafeIDI64;

// 懒加载的全局 RoleService 实例
static ROLE_SERVICE: Lazy<RoleService> = Lazy::new(RoleService::new_lazy);

pub async fn list_roles(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.list_roles(&req).await
}

pub async fn list_permissions() -> ActixResult<HttpResponse> {
    ROLE_SERVICE.list_permissions().await
}

pub async fn create_role(
    req: HttpRequest,
    body: web::Json<CreateRoleRequest>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.create_role(&req, body.into_inner()).await
}

pub async fn get_role(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.get_role(&req, id.0).await
}

pub async fn update_role(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateRoleRequest>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.update_role(&req, id.0, body.into_inner()).await
}

pub async fn delete_role(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.delete_role(&req, id.0).await
}

// 配置路由
pub fn configure_role_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/roles")
            .wrap(middlewares::RequirePermission::new(permissions::ROLES_MANAGE))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/permissions", web::get().to(list_permissions))
            .route("/{id}", web::get().to(get_role))
            .route("/{id}", web::put().to(update_role))
            .route("/{id}", web::delete().to(delete_role)),
    );
}
