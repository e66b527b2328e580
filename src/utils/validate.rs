use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 -]{6,18}[0-9]$").expect("Invalid phone regex"));

static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/_-]{1,32}$").expect("Invalid student id regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 长度 3..=32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

pub fn validate_student_id(student_id: &str) -> Result<(), &'static str> {
    if !STUDENT_ID_RE.is_match(student_id) {
        return Err("Student ID must be 1-32 letters, numbers, '/', '_' or '-'");
    }
    Ok(())
}

/// 密码策略：至少 8 位，同时包含字母与数字
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("asha.k").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(validate_email("student@college.edu.in").is_ok());
        assert!(validate_email("student@college").is_err());
        assert!(validate_phone("+91 98470 12345").is_ok());
        assert!(validate_phone("12ab").is_err());
    }

    #[test]
    fn test_student_id() {
        assert!(validate_student_id("KL/2025-001").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id("bad id").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("exam2025").is_ok());
        let err = validate_password("short").unwrap_err();
        assert!(err.contains("at least 8"));
        assert!(err.contains("digit"));
        assert!(validate_password("12345678").is_err());
    }
}
