use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 权限名，全部权限由 "*" 表示
pub mod permissions {
    pub const ALL: &str = "*";

    pub const EXAMS_READ: &str = "exams.read";
    pub const EXAMS_WRITE: &str = "exams.write";
    pub const RESULTS_READ: &str = "results.read";
    pub const STUDENTS_READ: &str = "students.read";
    pub const STUDENTS_WRITE: &str = "students.write";
    pub const ANNOUNCEMENTS_READ: &str = "announcements.read";
    pub const ANNOUNCEMENTS_WRITE: &str = "announcements.write";
    pub const PREVIOUS_QUESTIONS_READ: &str = "previous_questions.read";
    pub const PREVIOUS_QUESTIONS_WRITE: &str = "previous_questions.write";
    pub const SETTINGS_READ: &str = "settings.read";
    pub const SETTINGS_WRITE: &str = "settings.write";
    pub const ROLES_MANAGE: &str = "roles.manage";
    pub const SUBJECTS_WRITE: &str = "subjects.write";
    pub const HELP_MANAGE: &str = "help.manage";

    /// 可分配给角色的全部权限
    pub const KNOWN: &[&str] = &[
        ALL,
        EXAMS_READ,
        EXAMS_WRITE,
        RESULTS_READ,
        STUDENTS_READ,
        STUDENTS_WRITE,
        ANNOUNCEMENTS_READ,
        ANNOUNCEMENTS_WRITE,
        PREVIOUS_QUESTIONS_READ,
        PREVIOUS_QUESTIONS_WRITE,
        SETTINGS_READ,
        SETTINGS_WRITE,
        ROLES_MANAGE,
        SUBJECTS_WRITE,
        HELP_MANAGE,
    ];

    pub fn is_known(name: &str) -> bool {
        KNOWN.contains(&name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Role {
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p == permissions::ALL || p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(perms: &[&str]) -> Role {
        Role {
            id: 1,
            name: "editor".into(),
            description: None,
            permissions: perms.iter().map(|s| s.to_string()).collect(),
            is_system: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_grants() {
        let r = role(&[permissions::EXAMS_READ]);
        assert!(r.grants(permissions::EXAMS_READ));
        assert!(!r.grants(permissions::EXAMS_WRITE));
        assert!(role(&["*"]).grants(permissions::ROLES_MANAGE));
        assert!(!role(&[]).grants(permissions::EXAMS_READ));
    }

    #[test]
    fn test_known_permissions() {
        assert!(permissions::is_known("results.read"));
        assert!(!permissions::is_known("results.delete"));
    }
}
