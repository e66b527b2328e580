use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_not_found};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(id).await {
        Ok(true) => {
            RequireJWT::forget_user(request, id).await;
            tracing::info!("Student {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(student_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
