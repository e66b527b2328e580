//! 测试辅助：内存数据库与常用数据

use std::sync::Arc;

use crate::models::exams::entities::{ExamFormat, ExamStatus};
use crate::models::exams::requests::{ExamDraft, ExamSubjectInput};
use crate::models::users::entities::{User, UserStatus, role_names};
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

/// 每次调用返回一个新的临时目录
pub(crate) fn temp_root(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "exam-admin-{name}-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub(crate) async fn storage() -> Arc<SeaOrmStorage> {
    Arc::new(SeaOrmStorage::in_memory().await.unwrap())
}

pub(crate) fn new_student(username: &str, student_id: &str) -> NewUser {
    NewUser {
        username: username.into(),
        email: Some(format!("{username}@example.com")),
        student_id: Some(student_id.into()),
        password_hash: "hash".into(),
        role: role_names::STUDENT.into(),
        status: UserStatus::Active,
        full_name: Some(format!("Student {username}")),
        phone: None,
        state: Some("Kerala".into()),
        district: Some("Ernakulam".into()),
        region: None,
        college: None,
    }
}

pub(crate) async fn create_user_with_role(storage: &SeaOrmStorage, username: &str, role: &str) -> User {
    let mut user = new_student(username, &format!("ID-{username}"));
    user.role = role.into();
    user.student_id = None;
    storage.create_user(user).await.unwrap()
}

pub(crate) fn exam_draft(title: &str, category: &str, set_type: Option<&str>) -> ExamDraft {
    ExamDraft {
        title: title.into(),
        exam_type: "IIT".into(),
        exam_format: ExamFormat::Comprehensive,
        total_marks: 300,
        duration: 180,
        start_date: "2025-06-01".into(),
        start_time: Some("09:00".into()),
        venue: None,
        description: None,
        status: ExamStatus::Scheduled,
        category: category.into(),
        set_type: set_type.map(Into::into),
    }
}

pub(crate) fn subjects(items: &[(&str, i32)]) -> Vec<ExamSubjectInput> {
    items
        .iter()
        .map(|(name, marks)| ExamSubjectInput {
            id: None,
            subject: name.to_string(),
            marks: *marks,
        })
        .collect()
}
