use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_not_found};
use crate::models::ApiResponse;
use crate::models::announcements::requests::AnnouncementListParams;
use crate::services::error_response;

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    params: AnnouncementListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_announcements(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Announcements retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_announcement(id).await {
        Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            announcement,
            "Announcement retrieved successfully",
        ))),
        Ok(None) => Ok(announcement_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
