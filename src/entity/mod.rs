//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcements;
pub mod exam_subjects;
pub mod exams;
pub mod help_faqs;
pub mod previous_question_sets;
pub mod question_options;
pub mod questions;
pub mod roles;
pub mod settings;
pub mod student_exam_subjects;
pub mod student_exams;
pub mod subjects;
pub mod support_tickets;
pub mod users;

/// 秒级时间戳转换为 UTC 时间
pub(crate) fn ts_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
