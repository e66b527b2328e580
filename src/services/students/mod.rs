pub mod attempts;
pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, RecordAttemptRequest, RegisterExamRequest, StudentListParams,
    UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, params).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        list::get_student(self, request, id).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        create_request: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, create_request).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        update_request: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, update_request).await
    }

    pub async fn delete_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, id).await
    }

    pub async fn list_attempts(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, request, id).await
    }

    pub async fn register_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        register_request: RegisterExamRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::register_exam(self, request, id, register_request).await
    }

    pub async fn record_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        exam_id: i64,
        record: RecordAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::record_exam(self, request, id, exam_id, record).await
    }
}

pub(crate) fn student_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::UserNotFound,
        "Student not found",
    ))
}

pub(crate) fn duplicate_field_response(field: &str) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::UserAlreadyExists,
        format!("A user with this {field} already exists"),
    ))
}

/// 可选字段的格式校验，空串视为未填写
pub(crate) fn validate_profile(
    email: Option<&str>,
    phone: Option<&str>,
    student_id: Option<&str>,
) -> Result<(), (ErrorCode, &'static str)> {
    use crate::utils::validate::{validate_email, validate_phone, validate_student_id};

    if let Some(email) = email.filter(|s| !s.is_empty()) {
        validate_email(email).map_err(|m| (ErrorCode::UserEmailInvalid, m))?;
    }
    if let Some(phone) = phone.filter(|s| !s.is_empty()) {
        validate_phone(phone).map_err(|m| (ErrorCode::BadRequest, m))?;
    }
    if let Some(student_id) = student_id.filter(|s| !s.is_empty()) {
        validate_student_id(student_id).map_err(|m| (ErrorCode::BadRequest, m))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_profile() {
        assert!(validate_profile(Some("anu@example.com"), Some("+91 98470 12345"), Some("KL/2025-01")).is_ok());
        assert!(validate_profile(Some(""), None, None).is_ok());
        assert_eq!(
            validate_profile(Some("not-an-email"), None, None).unwrap_err().0,
            ErrorCode::UserEmailInvalid
        );
        assert!(validate_profile(None, Some("12"), None).is_err());
    }
}
