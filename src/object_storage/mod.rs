//! 对象存储
//!
//! 上传的媒体与文档按 key 存入后端，返回可公开访问的 URL。
//! 后端与缓存一样以插件形式注册，启动时按 `object_storage.type` 选择。

pub mod local;
pub mod register;

use async_trait::async_trait;

use crate::errors::Result;

/// 存入成功后的对象信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
    pub size: usize,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<StoredObject>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn delete(&self, key: &str) -> Result<bool>;
    /// key 对应的公开 URL
    fn public_url(&self, key: &str) -> String;
}

/// key 只允许相对路径，禁止越级
pub fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key.split('/').all(|part| !part.is_empty() && part != "." && part != "..")
}

/// 上传文件名转为存储 key：`{prefix}/{timestamp}-{name}`，名称中的特殊字符替换为 `_`
pub fn object_key(prefix: &str, original_name: &str, timestamp: i64) -> String {
    let file_name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned = if cleaned.is_empty() { "file" } else { cleaned };

    format!("{prefix}/{timestamp}-{cleaned}")
}

/// 声明对象存储插件，进程启动时自动注册
///
/// 类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_storage_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_storage_plugin() {
            $crate::object_storage::register::register_object_storage_plugin(
                $name,
                std::sync::Arc::new(|| {
                    <$ty>::new()
                        .map(|storage| {
                            std::sync::Arc::new(storage)
                                as std::sync::Arc<dyn $crate::object_storage::ObjectStorage>
                        })
                        .map_err($crate::errors::ExamAdminError::object_storage)
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_key() {
        assert!(is_safe_key("media/1700000000-banner.png"));
        assert!(!is_safe_key("../etc/passwd"));
        assert!(!is_safe_key("media/../../secret"));
        assert!(!is_safe_key("/abs/path.png"));
        assert!(!is_safe_key("media//double.png"));
        assert!(!is_safe_key(""));
    }

    #[test]
    fn test_object_key_keeps_original_name() {
        assert_eq!(
            object_key("media", "Result banner.png", 1700000000),
            "media/1700000000-Result_banner.png"
        );
        assert_eq!(
            object_key("documents", "C:\\papers\\jee-2024.pdf", 42),
            "documents/42-jee-2024.pdf"
        );
        assert_eq!(object_key("media", "..", 1), "media/1-file");
        assert!(is_safe_key(&object_key("media", "../../x.png", 1)));
    }
}
