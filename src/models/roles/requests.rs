use serde::Deserialize;
use ts_rs::TS;

use super::entities::permissions;
use crate::errors::{ExamAdminError, Result};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// 去重并校验权限名
pub fn normalize_permissions(input: Vec<String>) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(input.len());
    for p in input {
        let p = p.trim().to_string();
        if !permissions::is_known(&p) {
            return Err(ExamAdminError::validation(format!("Unknown permission: {p}")));
        }
        if !out.contains(&p) {
            out.push(p);
        }
    }
    Ok(out)
}

/// 角色名：小写字母、数字与下划线
pub fn validate_role_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 32
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ExamAdminError::validation(
            "Role name must be 1-32 characters of lowercase letters, digits or underscores",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_permissions() {
        let perms = normalize_permissions(vec![
            "exams.read".into(),
            " exams.read ".into(),
            "results.read".into(),
        ])
        .unwrap();
        assert_eq!(perms, vec!["exams.read", "results.read"]);
        assert!(normalize_permissions(vec!["exams.destroy".into()]).is_err());
    }

    #[test]
    fn test_role_name() {
        assert!(validate_role_name("exam_editor").is_ok());
        assert!(validate_role_name("Exam Editor").is_err());
        assert!(validate_role_name("").is_err());
    }
}
