use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{ResultsExportParams, ResultsParams};
use crate::models::roles::entities::permissions;
use crate::services::ResultService;

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultsParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

pub async fn summarize_results(
    req: HttpRequest,
    query: web::Query<ResultsParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .summarize_results(&req, query.into_inner())
        .await
}

pub async fn export_results(
    req: HttpRequest,
    query: web::Query<ResultsExportParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.export_results(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/results")
            .wrap(middlewares::RequirePermission::new(permissions::RESULTS_READ))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_results))
            .route("/summary", web::get().to(summarize_results))
            .service(
                web::resource("/export")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(export_results)),
            ),
    );
}
