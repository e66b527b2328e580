use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, exam_not_found};
use crate::models::ApiResponse;
use crate::services::error_response;

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 科目、题目、报名记录由外键级联删除
    match storage.delete_exam(exam_id).await {
        Ok(true) => {
            tracing::info!("Exam {} deleted", exam_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam deleted successfully")))
        }
        Ok(false) => Ok(exam_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
