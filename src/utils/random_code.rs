use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成指定长度的字母数字随机串，用于初始管理员密码
pub fn generate_random_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// 生成满足密码策略的随机密码（至少含一个字母和一个数字）
pub fn generate_password(len: usize) -> String {
    let len = len.max(8);
    loop {
        let candidate = generate_random_code(len);
        if crate::utils::validate::validate_password(&candidate).is_ok() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code_length_and_charset() {
        let code = generate_random_code(24);
        assert_eq!(code.len(), 24);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let pwd = generate_password(4);
            assert!(pwd.len() >= 8);
            assert!(crate::utils::validate::validate_password(&pwd).is_ok());
        }
    }
}
