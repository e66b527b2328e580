use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::errors::ExamAdminError;
use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::models::subjects::responses::SubjectListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

fn subject_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubjectNotFound,
        "Subject not found",
    ))
}

fn duplicate_subject() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::SubjectAlreadyExists,
        "A subject with this name already exists",
    ))
}

fn blank_name() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        "Subject name is required",
    ))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject(id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    create_request: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = create_request.name.trim();
    if name.is_empty() {
        return Ok(blank_name());
    }

    match storage
        .create_subject(
            name,
            trimmed(create_request.code).filter(|s| !s.is_empty()),
            create_request.description,
        )
        .await
    {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_subject()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = trimmed(update_request.name);
    if name.as_deref() == Some("") {
        return Ok(blank_name());
    }

    match storage
        .update_subject(
            id,
            name,
            trimmed(update_request.code),
            update_request.description,
        )
        .await
    {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(ExamAdminError::Conflict(_)) => Ok(duplicate_subject()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_subject(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Subject deleted successfully",
        ))),
        Ok(false) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
