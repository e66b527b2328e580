use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, permissions_for};
use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{AccessToken, SessionUser, TokenVerificationResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};
use crate::utils::jwt;

fn expired_session() -> HttpResponse {
    // 清除无效的 refresh token cookie
    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
    HttpResponse::Unauthorized()
        .cookie(empty_cookie)
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized_response());
    };

    let (claims, access_token) = match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(refreshed) => refreshed,
        Err(e) => {
            tracing::debug!("Refresh token rejected: {}", e);
            return Ok(expired_session());
        }
    };

    // 账号在 refresh token 有效期内被停用或删除
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => return Ok(expired_session()),
    };
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.is_active() => {}
        Ok(_) => return Ok(expired_session()),
        Err(e) => return Ok(error_response(&e)),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AccessToken::bearer(access_token, config.jwt.access_token_expiry),
        "Token refreshed successfully",
    )))
}

/// 能走到这里说明 RequireJWT 已经校验通过
pub async fn handle_verify_token(request: &HttpRequest) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse {
            is_valid: true,
            user_id: RequireJWT::extract_user_id(request),
        },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(unauthorized_response());
    };
    let permissions = permissions_for(&storage, &user.role).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionUser { user, permissions },
        "User information retrieved successfully",
    )))
}

/// 服务端不保存会话，登出只需让浏览器丢掉 refresh cookie
pub async fn handle_logout() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logged out successfully")))
}
