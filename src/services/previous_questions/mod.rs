//! 历年真题：元数据管理、文档上传、预览与下载代理

pub mod create;
pub mod delete;
pub mod download;
pub mod list;
pub mod preview;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::previous_questions::requests::{
    CreatePreviousQuestionRequest, PreviousQuestionListParams,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct PreviousQuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl PreviousQuestionService {
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

    pub async fn list(
        &self,
        request: &HttpRequest,
        params: PreviousQuestionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_previous_questions(self, request, params).await
    }

    pub async fn get(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        list::get_previous_question(self, request, id).await
    }

    pub async fn create(
        &self,
        request: &HttpRequest,
        create_request: CreatePreviousQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_previous_question(self, request, create_request).await
    }

    pub async fn upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::upload_document(request, payload).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_previous_question(self, request, id).await
    }

    pub async fn preview(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        preview::preview_previous_question(self, request, id).await
    }

    pub async fn download(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        download::download_previous_question(self, request, id).await
    }
}

pub(crate) fn previous_question_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::PreviousQuestionNotFound,
        "Previous question set not found",
    ))
}
