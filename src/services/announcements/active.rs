use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_not_found};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::announcements::responses::{
    ActiveAnnouncementsResponse, AnnouncementViewResponse,
};
use crate::services::{error_response, unauthorized_response};

/// 当前用户可见的已发布公告
pub async fn list_active(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(role) = RequireJWT::extract_user_role(request) else {
        return Ok(unauthorized_response());
    };

    match storage.list_active_announcements(&role).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ActiveAnnouncementsResponse { items },
            "Active announcements retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn record_view(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.increment_announcement_views(id).await {
        Ok(Some(views)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AnnouncementViewResponse { id, views },
            "View recorded",
        ))),
        Ok(None) => Ok(announcement_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
