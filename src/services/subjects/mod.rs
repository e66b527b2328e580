pub mod crud;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        crud::list_subjects(self, request).await
    }

    pub async fn get_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        crud::get_subject(self, request, id).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        create_request: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_subject(self, request, create_request).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_subject(self, request, id, update_request).await
    }

    pub async fn delete_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        crud::delete_subject(self, request, id).await
    }
}
