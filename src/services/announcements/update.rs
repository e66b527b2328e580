use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_not_found, draft_error_response};
use crate::models::ApiResponse;
use crate::models::announcements::requests::UpdateAnnouncementRequest;
use crate::services::error_response;

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_announcement(id).await {
        Ok(Some(announcement)) => announcement,
        Ok(None) => return Ok(announcement_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    let draft = match update_request.merge_into(&existing) {
        Ok(draft) => draft,
        Err(e) => return Ok(draft_error_response(&e)),
    };

    match storage.update_announcement(id, draft).await {
        Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            announcement,
            "Announcement updated successfully",
        ))),
        Ok(None) => Ok(announcement_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
