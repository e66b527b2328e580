//! 角色与权限管理
//!
//! 系统角色（super_admin、admin、student）不可修改或删除；角色变更后清除权限缓存，
//! 已登录用户在下一次请求时拿到新权限。

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::roles::requests::{CreateRoleRequest, UpdateRoleRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct RoleService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_roles(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_roles(self, request).await
    }

    pub async fn list_permissions(&self) -> ActixResult<HttpResponse> {
        list::list_permissions().await
    }

    pub async fn get_role(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        list::get_role(self, request, id).await
    }

    pub async fn create_role(
        &self,
        request: &HttpRequest,
        create_request: CreateRoleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_role(self, request, create_request).await
    }

    pub async fn update_role(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateRoleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_role(self, request, id, update_request).await
    }

    pub async fn delete_role(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_role(self, request, id).await
    }
}

pub(crate) fn role_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::RoleNotFound,
        "Role not found",
    ))
}

pub(crate) fn system_role_response() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::SystemRoleImmutable,
        "System roles cannot be modified or deleted",
    ))
}

pub(crate) fn duplicate_role_response(name: &str) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::RoleAlreadyExists,
        format!("Role '{name}' already exists"),
    ))
}
