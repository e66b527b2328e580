//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

fn parse_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| bad_path(format!("Missing path parameter: {name}")))?;
    match raw.parse::<i64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(bad_path(format!("Invalid {name}: {raw}"))),
    }
}

/// 定义一个从指定路径段解析正整数 ID 的提取器
macro_rules! define_safe_i64_extractor {
    ($name:ident, $segment:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_i64(req, $segment).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeQuestionIdI64, "question_id");
define_safe_i64_extractor!(SafeExamIdI64, "exam_id");

static SETTING_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_.]{0,63}$").expect("Invalid setting key regex"));

static OBJECT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]{0,254}$").expect("Invalid object key regex"));

pub fn is_valid_setting_key(key: &str) -> bool {
    SETTING_KEY_RE.is_match(key)
}

/// 设置键：小写字母开头，只含小写字母、数字、下划线与点
#[derive(Debug, Clone)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let key = req.match_info().get("key").unwrap_or_default();
        if is_valid_setting_key(key) {
            ready(Ok(SafeSettingKey(key.to_string())))
        } else {
            ready(Err(bad_path(format!("Invalid setting key: {key}"))))
        }
    }
}

/// 对象存储键，允许子目录但不允许越级
#[derive(Debug, Clone)]
pub struct SafeObjectKey(pub String);

impl FromRequest for SafeObjectKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let key = req.match_info().get("key").unwrap_or_default();
        if OBJECT_KEY_RE.is_match(key) && crate::object_storage::is_safe_key(key) {
            ready(Ok(SafeObjectKey(key.to_string())))
        } else {
            ready(Err(bad_path("Invalid object key".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn show(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    async fn show_key(key: SafeSettingKey) -> HttpResponse {
        HttpResponse::Ok().body(key.0)
    }

    #[actix_web::test]
    async fn test_safe_id_extractor() {
        let app = test::init_service(
            App::new()
                .route("/items/{id}", web::get().to(show))
                .route("/settings/{key}", web::get().to(show_key)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/items/12").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "12");

        for bad in ["/items/abc", "/items/0", "/items/-3"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(bad).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{bad}");
        }

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/settings/site.name").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/settings/Bad-Key").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
