pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::settings::requests::{BatchUpdateSettingsRequest, UpdateSettingRequest};
use crate::storage::Storage;

pub struct SettingService {
    storage: Option<Arc<dyn Storage>>,
}

impl SettingService {
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

    pub async fn list_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_settings(self, request).await
    }

    pub async fn get_setting(&self, request: &HttpRequest, key: &str) -> ActixResult<HttpResponse> {
        get::get_setting(self, request, key).await
    }

    pub async fn update_setting(
        &self,
        request: &HttpRequest,
        key: &str,
        update_request: UpdateSettingRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_setting(self, request, key, update_request).await
    }

    pub async fn update_settings(
        &self,
        request: &HttpRequest,
        batch: BatchUpdateSettingsRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_settings(self, request, batch).await
    }
}
