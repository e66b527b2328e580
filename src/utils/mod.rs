pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod media_url;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod subject_label;
pub mod validate;

pub use extractor::{SafeExamIdI64, SafeIDI64, SafeObjectKey, SafeQuestionIdI64, SafeSettingKey};
pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::{contains_pattern, escape_like_pattern};
