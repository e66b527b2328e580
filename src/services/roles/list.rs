use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, role_not_found};
use crate::models::ApiResponse;
use crate::models::roles::entities::permissions;
use crate::models::roles::responses::{PermissionListResponse, RoleListResponse};
use crate::services::error_response;

pub async fn list_roles(service: &RoleService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_roles().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RoleListResponse { items },
            "Roles retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_permissions() -> ActixResult<HttpResponse> {
    let items = permissions::KNOWN.iter().map(|p| p.to_string()).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PermissionListResponse { items },
        "Permissions retrieved successfully",
    )))
}

pub async fn get_role(
    service: &RoleService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_role_by_id(id).await {
        Ok(Some(role)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            role,
            "Role retrieved successfully",
        ))),
        Ok(None) => Ok(role_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
