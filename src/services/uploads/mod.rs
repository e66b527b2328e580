//! 上传文件的接收、存储与回读
//!
//! 公告媒体与历年真题文档共用同一套 multipart 处理，差别只在扩展名白名单与 key 前缀。

pub mod receive;
pub mod serve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::object_storage::ObjectStorage;

pub use receive::{ReceivedFile, receive_single_file, store_upload};

pub struct UploadService {
    object_storage: Option<Arc<dyn ObjectStorage>>,
}

impl UploadService {
    pub fn new_lazy() -> Self {
        Self {
            object_storage: None,
        }
    }

    pub(crate) fn get_object_storage(&self, request: &HttpRequest) -> Arc<dyn ObjectStorage> {
        if let Some(storage) = &self.object_storage {
            storage.clone()
        } else {
            object_storage_from(request)
        }
    }

    pub async fn serve(&self, request: &HttpRequest, key: &str) -> ActixResult<HttpResponse> {
        serve::serve_object(self, request, key).await
    }
}

/// 从 app_data 取对象存储，其他服务上传时也走这里
pub(crate) fn object_storage_from(request: &HttpRequest) -> Arc<dyn ObjectStorage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectStorage>>>()
        .expect("Object storage not found in app data")
        .get_ref()
        .clone()
}
