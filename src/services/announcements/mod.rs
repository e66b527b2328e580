pub mod active;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ExamAdminError;
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_announcements(
        &self,
        request: &HttpRequest,
        params: AnnouncementListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_announcements(self, request, params).await
    }

    pub async fn get_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_announcement(self, request, id).await
    }

    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        create_request: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, request, create_request).await
    }

    pub async fn update_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_announcement(self, request, id, update_request).await
    }

    pub async fn delete_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_announcement(self, request, id).await
    }

    pub async fn list_active(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        active::list_active(self, request).await
    }

    pub async fn record_view(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        active::record_view(self, request, id).await
    }

    pub async fn upload_media(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_media(request, payload).await
    }
}

pub(crate) fn announcement_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AnnouncementNotFound,
        "Announcement not found",
    ))
}

/// 草稿构建失败时的响应，链接问题单独给出错误码
pub(crate) fn draft_error_response(err: &ExamAdminError) -> HttpResponse {
    match err {
        ExamAdminError::Validation(msg) if msg.contains("URL") => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::MediaUrlInvalid, msg.clone())),
        _ => error_response(err),
    }
}
