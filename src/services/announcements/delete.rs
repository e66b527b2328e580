use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_not_found};
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_announcement(id).await {
        Ok(true) => {
            tracing::info!("Announcement {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Announcement deleted successfully",
            )))
        }
        Ok(false) => Ok(announcement_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
