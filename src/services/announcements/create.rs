use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, draft_error_response};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::announcements::requests::CreateAnnouncementRequest;
use crate::services::error_response;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    create_request: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let draft = match create_request.into_draft() {
        Ok(draft) => draft,
        Err(e) => return Ok(draft_error_response(&e)),
    };

    let created_by = RequireJWT::extract_user_id(request);
    match storage.create_announcement(draft, created_by).await {
        Ok(announcement) => {
            tracing::info!(
                "Announcement {} created by {:?}",
                announcement.id,
                created_by
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                announcement,
                "Announcement created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
