use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, duplicate_field_response, validate_profile};
use crate::errors::ExamAdminError;
use crate::models::students::entities::StudentStats;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::StudentResponse;
use crate::models::users::entities::{UserStatus, role_names};
use crate::models::users::requests::NewUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    create_request: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let username = create_request.username.trim().to_string();
    if let Err(msg) = validate_username(&username) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNameInvalid,
            msg,
        )));
    }
    if let Err(msg) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            msg,
        )));
    }

    let email = non_empty(create_request.email);
    let student_id = non_empty(create_request.student_id);
    let phone = non_empty(create_request.phone);
    if let Err((code, msg)) =
        validate_profile(email.as_deref(), phone.as_deref(), student_id.as_deref())
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    match storage
        .find_user_conflict(Some(&username), email.as_deref(), student_id.as_deref(), None)
        .await
    {
        Ok(Some(field)) => return Ok(duplicate_field_response(field)),
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e)),
    }

    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e)),
    };

    let new_user = NewUser {
        username,
        email,
        student_id,
        password_hash,
        role: role_names::STUDENT.to_string(),
        status: UserStatus::Active,
        full_name: non_empty(create_request.full_name),
        phone,
        state: non_empty(create_request.state),
        district: non_empty(create_request.district),
        region: non_empty(create_request.region),
        college: non_empty(create_request.college),
    };

    match storage.create_user(new_user).await {
        Ok(user) => {
            tracing::info!("Student {} created", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse {
                    user,
                    stats: StudentStats::default(),
                },
                "Student created successfully",
            )))
        }
        // 并发创建撞上唯一索引
        Err(ExamAdminError::Conflict(_)) => {
            Ok(duplicate_field_response("username, email or student ID"))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
