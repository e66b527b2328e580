use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, duplicate_role_response, role_not_found, system_role_response};
use crate::errors::ExamAdminError;
use crate::middlewares::RequirePermission;
use crate::models::roles::requests::{
    UpdateRoleRequest, normalize_permissions, validate_role_name,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_as};

pub async fn update_role(
    service: &RoleService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateRoleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_role_by_id(id).await {
        Ok(Some(role)) => role,
        Ok(None) => return Ok(role_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };
    if existing.is_system {
        return Ok(system_role_response());
    }

    let name = update_request.name.map(|n| n.trim().to_string());
    if let Some(ref name) = name {
        if let Err(e) = validate_role_name(name) {
            return Ok(error_response(&e));
        }
        if *name != existing.name {
            match storage.get_role_by_name(name).await {
                Ok(Some(_)) => return Ok(duplicate_role_response(name)),
                Ok(None) => {}
                Err(e) => return Ok(error_response(&e)),
            }
        }
    }

    let permissions = match update_request.permissions.map(normalize_permissions).transpose() {
        Ok(permissions) => permissions,
        Err(e) => return Ok(error_response_as(ErrorCode::PermissionUnknown, &e)),
    };

    match storage
        .update_role(id, name, update_request.description, permissions)
        .await
    {
        Ok(Some(role)) => {
            RequirePermission::forget_role(request, &existing.name).await;
            if role.name != existing.name {
                RequirePermission::forget_role(request, &role.name).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                role,
                "Role updated successfully",
            )))
        }
        Ok(None) => Ok(role_not_found()),
        Err(ExamAdminError::Authorization(_)) => Ok(system_role_response()),
        Err(ExamAdminError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::RoleInUse,
                "Role is assigned to users and cannot be renamed",
            ),
        )),
        Err(e) => Ok(error_response(&e)),
    }
}
