/*!
 * 速率限制中间件
 *
 * 固定窗口计数：同一个键在一个窗口内超过上限返回 429。
 * 已认证请求按用户计数，否则按客户端 IP。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

// 键带窗口序号，过期时间覆盖最长的窗口即可
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

const MAX_WINDOW_SECS: u64 = 3600;

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, MAX_WINDOW_SECS),
            key_prefix,
        }
    }

    /// 登录：每个 IP 每分钟 5 次
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 刷新令牌：每个 IP 每分钟 10 次
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 文件上传：每个用户每分钟 10 次
    pub fn upload() -> Self {
        Self::new("upload", 10, 60)
    }

    fn cache_key(&self, identifier: &str, now_secs: u64) -> String {
        format!(
            "{}:{}:{}",
            self.key_prefix,
            identifier,
            now_secs / self.window_secs
        )
    }

    fn retry_after(&self, now_secs: u64) -> u64 {
        self.window_secs - now_secs % self.window_secs
    }
}

/// 客户端 IP：优先连接信息，其次 X-Forwarded-For 第一个地址、X-Real-IP
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());
    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next());
    let real_ip = req.headers().get("X-Real-IP").and_then(|v| v.to_str().ok());

    [forwarded, real_ip]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .map(str::to_string)
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

/// extensions 的借用在返回前结束，之后才能读取 connection_info
fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    req.extensions().get::<User>().map(|user| user.id)
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let identifier = match extract_user_id(&req) {
                Some(user_id) => format!("user:{user_id}"),
                None => format!("ip:{}", extract_client_ip(&req)),
            };
            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let cache_key = limit.cache_key(&identifier, now);

            let count = RATE_LIMIT_CACHE
                .entry(cache_key.clone())
                .and_upsert_with(|existing| {
                    let current = existing.map(|e| e.into_value()).unwrap_or(0);
                    std::future::ready(current.saturating_add(1))
                })
                .await
                .into_value();

            if count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for key: {} ({}/{})",
                    cache_key, count, limit.max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(limit.retry_after(now)).map_into_right_body(),
                ));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test, web};

    #[test]
    fn test_window_keys() {
        let limit = RateLimit::login();
        assert_eq!(limit.cache_key("ip:1.2.3.4", 119), "login:ip:1.2.3.4:1");
        assert_eq!(limit.cache_key("ip:1.2.3.4", 120), "login:ip:1.2.3.4:2");
        assert_eq!(limit.retry_after(119), 1);
        assert_eq!(RateLimit::new("x", 1, 0).window_secs, 1);
    }

    #[actix_web::test]
    async fn test_blocks_after_limit() {
        let app = actix_test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new("test-limited", 2, 3600))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let request = || {
            actix_test::TestRequest::post()
                .uri("/limited")
                .insert_header(("X-Forwarded-For", "203.0.113.9"))
                .to_request()
        };
        assert_eq!(actix_test::call_service(&app, request()).await.status(), StatusCode::OK);
        assert_eq!(actix_test::call_service(&app, request()).await.status(), StatusCode::OK);
        let resp = actix_test::call_service(&app, request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("Retry-After"));
    }
}
