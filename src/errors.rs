//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及对应的 HTTP 状态码。

use actix_web::http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - http_status() 方法 - 返回映射到 API 的状态码
/// - 便捷构造函数
macro_rules! define_exam_admin_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ExamAdminError {
            $($variant(String),)*
        }

        impl ExamAdminError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ExamAdminError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ExamAdminError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ExamAdminError::$variant(msg) => msg,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(ExamAdminError::$variant(_) => StatusCode::$status,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ExamAdminError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ExamAdminError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_exam_admin_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", BAD_REQUEST),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    StoragePluginNotFound("E010", "Storage Plugin Not Found", INTERNAL_SERVER_ERROR),
    DateParse("E011", "Date Parse Error", BAD_REQUEST),
    Authentication("E012", "Authentication Error", UNAUTHORIZED),
    Authorization("E013", "Authorization Error", FORBIDDEN),
    Conflict("E014", "Conflict Error", CONFLICT),
    ObjectStorage("E015", "Object Storage Error", INTERNAL_SERVER_ERROR),
    RemoteFetch("E016", "Remote Fetch Error", BAD_GATEWAY),
}

impl ExamAdminError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否可以把详情直接返回给调用方（驱动层错误只写日志）
    pub fn is_client_facing(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 包装数据库错误，唯一约束与外键约束分别映射为冲突与校验错误
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ExamAdminError::Conflict(format!("{context}: duplicate record ({detail})"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ExamAdminError::Validation(format!("{context}: referenced record missing ({detail})"))
            }
            _ => ExamAdminError::DatabaseOperation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for ExamAdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ExamAdminError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for ExamAdminError {
    fn from(err: DbErr) -> Self {
        ExamAdminError::from_db("数据库操作失败", err)
    }
}

impl From<std::io::Error> for ExamAdminError {
    fn from(err: std::io::Error) -> Self {
        ExamAdminError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ExamAdminError {
    fn from(err: serde_json::Error) -> Self {
        ExamAdminError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ExamAdminError {
    fn from(err: chrono::ParseError) -> Self {
        ExamAdminError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for ExamAdminError {
    fn from(err: reqwest::Error) -> Self {
        ExamAdminError::RemoteFetch(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ExamAdminError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ExamAdminError::Authentication(format!("Invalid token: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ExamAdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExamAdminError::cache_connection("test").code(), "E001");
        assert_eq!(ExamAdminError::database_config("test").code(), "E003");
        assert_eq!(ExamAdminError::validation("test").code(), "E007");
        assert_eq!(ExamAdminError::authentication("test").code(), "E012");
        assert_eq!(ExamAdminError::conflict("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ExamAdminError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            ExamAdminError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ExamAdminError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExamAdminError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ExamAdminError::authorization("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ExamAdminError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(ExamAdminError::not_found("x").is_client_facing());
        assert!(!ExamAdminError::database_operation("x").is_client_facing());
    }

    #[test]
    fn test_generic_db_error_is_internal() {
        let err = ExamAdminError::from(DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = ExamAdminError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
