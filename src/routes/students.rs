use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::roles::entities::permissions;
use crate::models::students::requests::{
    CreateStudentRequest, RecordAttemptRequest, RegisterExamRequest, StudentListParams,
    UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::{SafeExamIdI64, SafeIDI64};

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, id.0).await
}

pub async fn list_attempts(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_attempts(&req, id.0).await
}

pub async fn register_exam(
    req: HttpRequest,
    id: SafeIDI64,
    register_data: web::Json<RegisterExamRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .register_exam(&req, id.0, register_data.into_inner())
        .await
}

pub async fn record_exam(
    req: HttpRequest,
    id: SafeIDI64,
    exam_id: SafeExamIdI64,
    record: web::Json<RecordAttemptRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .record_exam(&req, id.0, exam_id.0, record.into_inner())
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/students")
            .wrap(middlewares::RequirePermission::by_method(
                permissions::STUDENTS_READ,
                permissions::STUDENTS_WRITE,
            ))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student))
            .route("/{id}/exams", web::get().to(list_attempts))
            .route("/{id}/exams", web::post().to(register_exam))
            .route("/{id}/exams/{exam_id}", web::put().to(record_exam)),
    );
}
