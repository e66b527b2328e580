pub mod export;
pub mod list;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::{ResultsExportParams, ResultsParams};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    pub async fn list_results(
        &self,
        request: &HttpRequest,
        params: ResultsParams,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, request, params).await
    }

    pub async fn summarize_results(
        &self,
        request: &HttpRequest,
        params: ResultsParams,
    ) -> ActixResult<HttpResponse> {
        summary::summarize_results(self, request, params).await
    }

    pub async fn export_results(
        &self,
        request: &HttpRequest,
        params: ResultsExportParams,
    ) -> ActixResult<HttpResponse> {
        export::export_results(self, request, params).await
    }
}
