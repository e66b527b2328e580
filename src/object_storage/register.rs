//! 对象存储插件注册表

use crate::errors::{ExamAdminError, Result};
use crate::object_storage::ObjectStorage;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

pub type ObjectStorageConstructor =
    Arc<dyn Fn() -> Result<Arc<dyn ObjectStorage>> + Send + Sync>;

static OBJECT_STORAGE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectStorageConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_storage_plugin<S: Into<String>>(
    name: S,
    constructor: ObjectStorageConstructor,
) {
    OBJECT_STORAGE_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), constructor);
}

pub fn create_object_storage(name: &str) -> Result<Arc<dyn ObjectStorage>> {
    let constructor = OBJECT_STORAGE_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
        .ok_or_else(|| {
            ExamAdminError::storage_plugin_not_found(format!(
                "Object storage backend '{name}' is not registered"
            ))
        })?;
    constructor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_backend() {
        let err = create_object_storage("s3-compatible").err().unwrap();
        assert!(matches!(err, ExamAdminError::StoragePluginNotFound(_)));
    }
}
