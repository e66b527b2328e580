use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, duplicate_role_response};
use crate::errors::ExamAdminError;
use crate::models::roles::requests::{
    CreateRoleRequest, normalize_permissions, validate_role_name,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_as};

pub async fn create_role(
    service: &RoleService,
    request: &HttpRequest,
    create_request: CreateRoleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = create_request.name.trim().to_string();
    if let Err(e) = validate_role_name(&name) {
        return Ok(error_response(&e));
    }
    let permissions = match normalize_permissions(create_request.permissions) {
        Ok(permissions) => permissions,
        Err(e) => return Ok(error_response_as(ErrorCode::PermissionUnknown, &e)),
    };

    match storage.get_role_by_name(&name).await {
        Ok(Some(_)) => return Ok(duplicate_role_response(&name)),
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e)),
    }

    match storage
        .create_role(&name, create_request.description, permissions)
        .await
    {
        Ok(role) => {
            tracing::info!("Role {} created", role.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                role,
                "Role created successfully",
            )))
        }
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_role_response(&name)),
        Err(e) => Ok(error_response(&e)),
    }
}
