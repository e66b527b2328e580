use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{
    CreateExamRequest, CreateSetRequest, ExamListParams, UpdateExamRequest,
};
use crate::models::questions::requests::QuestionRequest;
use crate::models::roles::entities::permissions;
use crate::services::ExamService;
use crate::utils::{SafeIDI64, SafeQuestionIdI64};

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, exam_id.0).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: SafeIDI64,
    update_data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, exam_id.0, update_data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.0).await
}

pub async fn list_sets(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_sets(&req, exam_id.0).await
}

pub async fn create_set(
    req: HttpRequest,
    exam_id: SafeIDI64,
    set_data: web::Json<CreateSetRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_set(&req, exam_id.0, set_data.into_inner())
        .await
}

pub async fn list_questions(req: HttpRequest, exam_id: SafeIDI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_questions(&req, exam_id.0).await
}

pub async fn create_question(
    req: HttpRequest,
    exam_id: SafeIDI64,
    question: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_question(&req, exam_id.0, question.into_inner())
        .await
}

pub async fn update_question(
    req: HttpRequest,
    exam_id: SafeIDI64,
    question_id: SafeQuestionIdI64,
    question: web::Json<QuestionRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_question(&req, exam_id.0, question_id.0, question.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    exam_id: SafeIDI64,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .delete_question(&req, exam_id.0, question_id.0)
        .await
}

// 配置路由
pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exams")
            .wrap(middlewares::RequirePermission::by_method(
                permissions::EXAMS_READ,
                permissions::EXAMS_WRITE,
            ))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_exams))
            .route("", web::post().to(create_exam))
            .route("/{id}", web::get().to(get_exam))
            .route("/{id}", web::put().to(update_exam))
            .route("/{id}", web::delete().to(delete_exam))
            .route("/{id}/sets", web::get().to(list_sets))
            .route("/{id}/create-set", web::post().to(create_set))
            .route("/{id}/questions", web::get().to(list_questions))
            .route("/{id}/questions", web::post().to(create_question))
            .route(
                "/{id}/questions/{question_id}",
                web::put().to(update_question),
            )
            .route(
                "/{id}/questions/{question_id}",
                web::delete().to(delete_question),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::role_names;
    use crate::storage::Storage;
    use crate::test_support::{create_user_with_role, storage};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    fn realtime_exam() -> serde_json::Value {
        serde_json::json!({
            "title": "JEE Main Mock",
            "exam_type": "IIT",
            "exam_format": "comprehensive",
            "total_marks": 300,
            "duration": 180,
            "start_date": "2025-06-01",
            "start_time": "09:00",
            "category": "realtime",
            "set_type": "A",
            "subjects": [
                {"subject": "Physics", "marks": 100},
                {"subject": "Chemistry", "marks": 100}
            ]
        })
    }

    #[actix_web::test]
    async fn test_create_exam_rejects_duplicate_realtime_set() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_exam_routes),
        )
        .await;
        let token = JwtUtils::generate_access_token(admin.id, &admin.role).unwrap();

        let create = || {
            test::TestRequest::post()
                .uri("/api/exams")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(realtime_exam())
                .to_request()
        };

        let resp = test::call_service(&app, create()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["exam"]["subjects"].as_array().map(Vec::len), Some(2));

        let resp = test::call_service(&app, create()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("already exists"));
    }

    #[actix_web::test]
    async fn test_clone_set_rejects_duplicate_set_type() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "staff02", role_names::ADMIN).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_exam_routes),
        )
        .await;
        let token = JwtUtils::generate_access_token(admin.id, &admin.role).unwrap();
        let bearer = format!("Bearer {token}");

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(realtime_exam())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let exam_id = body["data"]["exam_id"].as_i64().unwrap();

        let clone_as = |set_type: &str| {
            test::TestRequest::post()
                .uri(&format!("/api/exams/{exam_id}/create-set"))
                .insert_header(("Authorization", bearer.clone()))
                .set_json(serde_json::json!({ "set_type": set_type }))
                .to_request()
        };

        // 与源考试同一套
        let resp = test::call_service(&app, clone_as("A")).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(&app, clone_as("B")).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["exam"]["set_type"], "B");
        assert_eq!(body["data"]["exam"]["status"], "draft");
        assert_eq!(body["data"]["exam"]["subjects"].as_array().map(Vec::len), Some(2));

        let resp = test::call_service(&app, clone_as("B")).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/exams/{exam_id}/sets"))
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let sets: Vec<_> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["set_type"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(sets, vec!["A", "B"]);
    }

    #[actix_web::test]
    async fn test_update_total_marks_checks_stored_subjects() {
        let storage = storage().await;
        let admin = create_user_with_role(&storage, "staff03", role_names::ADMIN).await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_exam_routes),
        )
        .await;
        let token = JwtUtils::generate_access_token(admin.id, &admin.role).unwrap();
        let bearer = format!("Bearer {token}");

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(realtime_exam())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let exam_id = body["data"]["exam_id"].as_i64().unwrap();

        // 已存科目合计 200 分
        let update = |total: i32| {
            test::TestRequest::put()
                .uri(&format!("/api/exams/{exam_id}"))
                .insert_header(("Authorization", bearer.clone()))
                .set_json(serde_json::json!({ "total_marks": total }))
                .to_request()
        };
        let resp = test::call_service(&app, update(150)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, update(250)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total_marks"], 250);
        assert_eq!(body["data"]["subjects"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn test_exam_list_requires_token() {
        let storage = storage().await;
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(dyn_storage))
                .configure(configure_exam_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/exams").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
