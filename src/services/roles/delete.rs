use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, role_not_found, system_role_response};
use crate::errors::ExamAdminError;
use crate::middlewares::RequirePermission;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_role(
    service: &RoleService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_role_by_id(id).await {
        Ok(Some(role)) => role,
        Ok(None) => return Ok(role_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.delete_role(id).await {
        Ok(true) => {
            RequirePermission::forget_role(request, &existing.name).await;
            tracing::info!("Role {} deleted", existing.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Role deleted successfully")))
        }
        Ok(false) => Ok(role_not_found()),
        Err(ExamAdminError::Authorization(_)) => Ok(system_role_response()),
        Err(ExamAdminError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::RoleInUse, "Role is still assigned to users"),
        )),
        Err(e) => Ok(error_response(&e)),
    }
}
