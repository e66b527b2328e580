pub mod announcements;
pub mod auth;
pub mod exams;
pub mod help;
pub mod previous_questions;
pub mod results;
pub mod roles;
pub mod settings;
pub mod students;
pub mod subjects;
pub mod uploads;

pub use announcements::AnnouncementService;
pub use auth::AuthService;
pub use exams::ExamService;
pub use help::HelpService;
pub use previous_questions::PreviousQuestionService;
pub use results::ResultService;
pub use roles::RoleService;
pub use settings::SettingService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use uploads::UploadService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::ExamAdminError;
use crate::models::{ApiResponse, ErrorCode};

fn default_code(err: &ExamAdminError) -> ErrorCode {
    match err {
        ExamAdminError::Validation(_) | ExamAdminError::DateParse(_) => ErrorCode::BadRequest,
        ExamAdminError::NotFound(_) => ErrorCode::NotFound,
        ExamAdminError::Conflict(_) => ErrorCode::Conflict,
        ExamAdminError::Authentication(_) => ErrorCode::Unauthorized,
        ExamAdminError::Authorization(_) => ErrorCode::Forbidden,
        ExamAdminError::RemoteFetch(_) => ErrorCode::RemoteFetchFailed,
        _ => ErrorCode::InternalServerError,
    }
}

/// 业务错误转换为响应
///
/// 4xx 直接返回错误详情；其余只写日志，响应中不带驱动层信息。
pub(crate) fn error_response(err: &ExamAdminError) -> HttpResponse {
    error_response_as(default_code(err), err)
}

/// 同 [`error_response`]，但使用指定的业务错误码
pub(crate) fn error_response_as(code: ErrorCode, err: &ExamAdminError) -> HttpResponse {
    let status = err.http_status();
    if err.is_client_facing() {
        return HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()));
    }

    error!("{}", err);
    let message = match err {
        ExamAdminError::RemoteFetch(_) => "Failed to fetch remote resource",
        _ => "Internal server error",
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

pub(crate) fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_response_status_mapping() {
        assert_eq!(
            error_response(&ExamAdminError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&ExamAdminError::conflict("dup")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(&ExamAdminError::authorization("nope")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_response(&ExamAdminError::database_operation("disk I/O error")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_response(&ExamAdminError::remote_fetch("timeout")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[actix_web::test]
    async fn test_driver_message_not_leaked() {
        let resp = error_response(&ExamAdminError::database_operation(
            "Failed to insert exam: near \"SELEC\": syntax error",
        ));
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Internal server error"));
        assert!(!text.contains("syntax error"));
    }
}
