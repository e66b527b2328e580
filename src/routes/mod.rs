pub mod announcements;

pub mod auth;

pub mod exams;

pub mod frontend;

pub mod help;

pub mod previous_questions;

pub mod results;

pub mod roles;

pub mod settings;

pub mod students;

pub mod subjects;

pub mod uploads;

pub use announcements::configure_announcement_routes;
pub use auth::configure_auth_routes;
pub use exams::configure_exam_routes;
pub use frontend::configure_frontend_routes;
pub use help::configure_help_routes;
pub use previous_questions::configure_previous_question_routes;
pub use results::configure_result_routes;
pub use roles::configure_role_routes;
pub use settings::configure_setting_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use uploads::configure_upload_routes;

use actix_web::web;

/// 注册全部 API 路由，前端 fallback 需在此之后单独注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_exam_routes)
        .configure(configure_result_routes)
        .configure(configure_student_routes)
        .configure(configure_announcement_routes)
        .configure(configure_previous_question_routes)
        .configure(configure_setting_routes)
        .configure(configure_role_routes)
        .configure(configure_subject_routes)
        .configure(configure_help_routes)
        .configure(configure_upload_routes);
}
