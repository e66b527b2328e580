use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::UploadService;
use crate::utils::SafeObjectKey;

// 懒加载的全局 UploadService 实例
static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn serve_upload(req: HttpRequest, key: SafeObjectKey) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.serve(&req, &key.0).await
}

// 上传文件公开可读，公告图片直接嵌入页面
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads/{key:.*}", web::get().to(serve_upload));
}
