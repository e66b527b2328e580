use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, permissions_for};
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::{AccessToken, LoginResponse, SessionUser};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::jwt;
use crate::utils::password::verify_password;

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let user = match storage.get_user_by_login(login_request.identifier()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(login_failed()),
        Err(e) => return Ok(error_response(&e)),
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Failed login attempt for {}", user.username);
        return Ok(login_failed());
    }

    // 停用或封禁的账号不能登录
    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            format!("Account is {}", user.status),
        )));
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    let refresh_days = login_request.refresh_days(&config.jwt);
    let token_pair = match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    let permissions = permissions_for(&storage, &user.role).await;
    tracing::info!("User {} logged in successfully", user.username);

    let response = LoginResponse {
        token: AccessToken::bearer(token_pair.access_token, config.jwt.access_token_expiry),
        session: SessionUser { user, permissions },
        logged_in_at: chrono::Utc::now(),
    };

    // refresh token 只走 HttpOnly cookie
    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
