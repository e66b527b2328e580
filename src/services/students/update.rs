use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, duplicate_field_response, student_not_found, validate_profile};
use crate::errors::ExamAdminError;
use crate::middlewares::RequireJWT;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::users::requests::UserChanges;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    update_request: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    let username = update_request.username.map(|s| s.trim().to_string());
    if let Some(ref username) = username
        && let Err(msg) = validate_username(username)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNameInvalid,
            msg,
        )));
    }
    let email = update_request.email.map(|s| s.trim().to_string());
    let student_id = update_request.student_id.map(|s| s.trim().to_string());
    if let Err((code, msg)) = validate_profile(
        email.as_deref(),
        update_request.phone.as_deref(),
        student_id.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    // 与其他用户比较唯一性
    match storage
        .find_user_conflict(
            username.as_deref(),
            email.as_deref(),
            student_id.as_deref(),
            Some(id),
        )
        .await
    {
        Ok(Some(field)) => return Ok(duplicate_field_response(field)),
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e)),
    }

    let password_hash = match update_request.password {
        Some(ref password) => {
            if let Err(msg) = validate_password(password) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserPasswordInvalid,
                    msg,
                )));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(error_response(&e)),
            }
        }
        None => None,
    };

    let changes = UserChanges {
        username,
        email,
        student_id,
        password_hash,
        status: update_request.status,
        full_name: update_request.full_name,
        phone: update_request.phone,
        state: update_request.state,
        district: update_request.district,
        region: update_request.region,
        college: update_request.college,
    };

    match storage.update_user(id, changes).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(student_not_found()),
        Err(ExamAdminError::Conflict(_)) => {
            return Ok(duplicate_field_response("username, email or student ID"));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    // 状态或资料变化后，缓存中的登录用户需要重新加载
    RequireJWT::forget_user(request, id).await;

    match storage.get_student(id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(student_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
